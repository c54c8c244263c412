// ============================================================================
// EXTERNAL COLLABORATORS
// ============================================================================
//
// Every contract the engine talks to is reached through one of these
// interfaces, so tests can register deterministic fakes in their place.
//
// - SynthTokenInterface : SEP-41 token whose admin may mint and claw back
// - PricePoolInterface  : AMM pool exposing cumulative tick observations
// - SwapRouterInterface : single-hop exact input swaps
// - PegPoolInterface    : liquidity seeding for the synth/collateral pair
// - PriceOracleInterface: TWAP consultation (synth-oracle)
// - ReserveInterface    : router-facing half of synth-reserve
//
// ============================================================================

use crate::{ExactInputSingleParams, MintParams, SynthError, TwapConsultation};
use soroban_sdk::{contractclient, Address, Env, Vec, U256};

#[allow(unused)]
#[contractclient(name = "SynthTokenClient")]
pub trait SynthTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn clawback(env: Env, from: Address, amount: i128);
    fn total_supply(env: Env) -> i128;
    fn balance(env: Env, id: Address) -> i128;
    fn decimals(env: Env) -> u32;
}

#[allow(unused)]
#[contractclient(name = "PricePoolClient")]
pub trait PricePoolInterface {
    /// Returns (tick_cumulatives, seconds_per_liquidity_cumulatives_x128)
    /// for each entry of `seconds_agos`
    fn observe(env: Env, seconds_agos: Vec<u32>) -> (Vec<i64>, Vec<U256>);
}

#[allow(unused)]
#[contractclient(name = "SwapRouterClient")]
pub trait SwapRouterInterface {
    fn exact_input_single(env: Env, params: ExactInputSingleParams) -> i128;
}

#[allow(unused)]
#[contractclient(name = "PegPoolClient")]
pub trait PegPoolInterface {
    /// Returns (position_id, liquidity, amount0, amount1)
    fn mint(env: Env, params: MintParams) -> (u32, u128, i128, i128);
    /// Underlying AMM pool used as the price source
    fn pool(env: Env) -> Address;
}

#[allow(unused)]
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracleInterface {
    fn sqrt_price_at_tick(env: Env, tick: i32) -> Result<U256, SynthError>;
    fn consult_twap(env: Env, pool: Address, period: u32) -> Result<U256, SynthError>;
    fn consult(env: Env, pool: Address, period: u32) -> Result<TwapConsultation, SynthError>;
}

#[allow(unused)]
#[contractclient(name = "ReserveClient")]
pub trait ReserveInterface {
    fn mint_authorized(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), SynthError>;
    fn target_ratio_bps(env: Env) -> Result<u32, SynthError>;
}
