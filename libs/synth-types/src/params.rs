use soroban_sdk::{contracttype, Address, U256};

/// Parameters for a single-hop exact input swap on the external swap router
#[contracttype]
#[derive(Clone, Debug)]
pub struct ExactInputSingleParams {
    /// Account the router pulls `token_in` from (via allowance)
    pub sender: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub deadline: u64,
    pub amount_in: i128,
    pub amount_out_minimum: i128,
    /// Q64.96 price bound, zero for no limit
    pub sqrt_price_limit_x96: U256,
}

/// Liquidity seeding parameters understood by the peg pool / position manager
#[contracttype]
#[derive(Clone, Debug)]
pub struct MintParams {
    /// Account the tokens are pulled from (via allowance)
    pub payer: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: i128,
    pub amount1_desired: i128,
    pub amount0_min: i128,
    pub amount1_min: i128,
    pub recipient: Address,
    pub deadline: u64,
}

/// Position handed back to the caller after liquidity seeding
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionReceipt {
    pub position_id: u32,
    pub liquidity: u128,
    pub amount0: i128,
    pub amount1: i128,
}

/// Result of consulting a pool's cumulative observations over a period
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TwapConsultation {
    /// Arithmetic mean tick, floored toward negative infinity
    pub mean_tick: i32,
    /// Harmonic mean of in-range liquidity over the period
    pub harmonic_mean_liquidity: u128,
}
