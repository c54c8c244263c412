#![no_std]

mod guard;
mod storage;

use guard::ExecutionGuard;
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol, U256};
use storage::{
    get_config, get_owner, get_peg_pool, is_initialized, require_owner, set_config, set_owner,
    set_peg_pool,
};
use synth_math::issuance_for_collateral;
use synth_types::{
    fee_to_tick_spacing, forward, full_range_ticks, settle, ExactInputSingleParams, MintParams,
    PegPoolClient, PositionReceipt, PriceOracleClient, ReserveClient, SwapRouterClient,
    SynthError, DEFAULT_DEADLINE_SECS,
};

pub use storage::RouterConfig;

/// User-facing entry point: liquidity seeding, swaps in both directions and
/// collateral-backed issuance. The router never holds funds between calls.
#[contract]
pub struct SynthRouter;

#[contractimpl]
impl SynthRouter {
    /// Initialize router with its collaborators
    pub fn initialize(
        env: Env,
        owner: Address,
        config: RouterConfig,
        peg_pool: Address,
    ) -> Result<(), SynthError> {
        if is_initialized(&env) {
            return Err(SynthError::AlreadyInitialized);
        }
        if fee_to_tick_spacing(config.fee).is_none() {
            return Err(SynthError::OutOfRange);
        }

        set_config(&env, &config);
        set_owner(&env, &owner);
        set_peg_pool(&env, &peg_pool);
        Ok(())
    }

    // === Liquidity ===

    /// Seed the synth/collateral pool over the full tick range.
    /// Whatever the peg pool does not consume goes back to the caller.
    pub fn add_liquidity(
        env: Env,
        caller: Address,
        synth_amount: i128,
        collateral_amount: i128,
    ) -> Result<PositionReceipt, SynthError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        caller.require_auth();

        if synth_amount <= 0 || collateral_amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let peg_pool = get_peg_pool(&env)?;
        let tick_spacing = fee_to_tick_spacing(config.fee).ok_or(SynthError::OutOfRange)?;
        let (tick_lower, tick_upper) = full_range_ticks(tick_spacing);
        let this = env.current_contract_address();

        let synth = token::Client::new(&env, &config.synth);
        let collateral = token::Client::new(&env, &config.collateral);

        settle(
            synth.try_transfer(&caller, &this, &synth_amount),
            SynthError::TransferFailure,
        )?;
        settle(
            collateral.try_transfer(&caller, &this, &collateral_amount),
            SynthError::TransferFailure,
        )?;

        approve(&env, &synth, &peg_pool, synth_amount)?;
        approve(&env, &collateral, &peg_pool, collateral_amount)?;

        // Pool tokens are ordered by address
        let synth_is_token0 = config.synth < config.collateral;
        let (token0, token1, amount0, amount1) = if synth_is_token0 {
            (config.synth.clone(), config.collateral.clone(), synth_amount, collateral_amount)
        } else {
            (config.collateral.clone(), config.synth.clone(), collateral_amount, synth_amount)
        };

        let params = MintParams {
            payer: this.clone(),
            token0,
            token1,
            fee: config.fee,
            tick_lower,
            tick_upper,
            amount0_desired: amount0,
            amount1_desired: amount1,
            amount0_min: 0,
            amount1_min: 0,
            recipient: caller.clone(),
            deadline: env.ledger().timestamp() + DEFAULT_DEADLINE_SECS,
        };

        let (position_id, liquidity, used0, used1) = settle(
            PegPoolClient::new(&env, &peg_pool).try_mint(&params),
            SynthError::LiquidityFailure,
        )?;

        let (synth_used, collateral_used) = if synth_is_token0 {
            (used0, used1)
        } else {
            (used1, used0)
        };
        if synth_used < 0
            || collateral_used < 0
            || synth_used > synth_amount
            || collateral_used > collateral_amount
        {
            return Err(SynthError::LiquidityFailure);
        }

        refund(&env, &synth, &caller, synth_amount - synth_used)?;
        refund(&env, &collateral, &caller, collateral_amount - collateral_used)?;
        approve(&env, &synth, &peg_pool, 0)?;
        approve(&env, &collateral, &peg_pool, 0)?;

        env.events().publish(
            (Symbol::new(&env, "liquidity_added"),),
            (caller, synth_amount, collateral_amount, position_id),
        );

        Ok(PositionReceipt {
            position_id,
            liquidity,
            amount0: used0,
            amount1: used1,
        })
    }

    // === Swaps ===

    /// Sell exactly `amount_in` synth for collateral.
    /// `deadline` defaults to five minutes from now.
    pub fn swap_synth_for_collateral(
        env: Env,
        caller: Address,
        amount_in: i128,
        min_amount_out: i128,
        sqrt_price_limit_x96: U256,
        deadline: Option<u64>,
    ) -> Result<i128, SynthError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        caller.require_auth();

        let config = get_config(&env)?;
        swap_exact_input(
            &env,
            &config,
            caller,
            config.synth.clone(),
            config.collateral.clone(),
            amount_in,
            min_amount_out,
            sqrt_price_limit_x96,
            deadline,
        )
    }

    /// Sell exactly `amount_in` collateral for synth.
    /// `deadline` defaults to five minutes from now.
    pub fn swap_collateral_for_synth(
        env: Env,
        caller: Address,
        amount_in: i128,
        min_amount_out: i128,
        sqrt_price_limit_x96: U256,
        deadline: Option<u64>,
    ) -> Result<i128, SynthError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        caller.require_auth();

        let config = get_config(&env)?;
        swap_exact_input(
            &env,
            &config,
            caller,
            config.collateral.clone(),
            config.synth.clone(),
            amount_in,
            min_amount_out,
            sqrt_price_limit_x96,
            deadline,
        )
    }

    // === Issuance ===

    /// Deposit collateral straight into the reserve and receive synth
    /// issued at the reserve's target ratio
    pub fn mint_with_collateral(
        env: Env,
        caller: Address,
        collateral_amount: i128,
        min_synth_out: i128,
    ) -> Result<i128, SynthError> {
        let _guard = ExecutionGuard::acquire(&env)?;
        caller.require_auth();

        if collateral_amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let reserve = ReserveClient::new(&env, &config.reserve);

        let target_ratio_bps = forward(reserve.try_target_ratio_bps(), SynthError::NotInitialized)?;
        let synth_out = issuance_for_collateral(collateral_amount, target_ratio_bps)?;
        if synth_out < min_synth_out {
            return Err(SynthError::InsufficientOutput);
        }

        settle(
            token::Client::new(&env, &config.collateral).try_transfer(
                &caller,
                &config.reserve,
                &collateral_amount,
            ),
            SynthError::TransferFailure,
        )?;

        forward(
            reserve.try_mint_authorized(&env.current_contract_address(), &caller, &synth_out),
            SynthError::TransferFailure,
        )?;

        env.events().publish(
            (Symbol::new(&env, "issued"),),
            (caller, collateral_amount, synth_out),
        );
        Ok(synth_out)
    }

    // === Pricing ===

    /// TWAP sqrt price of the peg pool's underlying AMM pool over `period` seconds
    pub fn quote_sqrt_price(env: Env, period: u32) -> Result<U256, SynthError> {
        let config = get_config(&env)?;
        let peg_pool = get_peg_pool(&env)?;

        let pool = settle(
            PegPoolClient::new(&env, &peg_pool).try_pool(),
            SynthError::OracleFailure,
        )?;
        forward(
            PriceOracleClient::new(&env, &config.oracle).try_consult_twap(&pool, &period),
            SynthError::OracleFailure,
        )
    }

    // === Administration ===

    pub fn set_peg_pool(env: Env, caller: Address, peg_pool: Address) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;

        let old_peg_pool = get_peg_pool(&env)?;
        set_peg_pool(&env, &peg_pool);

        env.events().publish(
            (Symbol::new(&env, "peg_pool_updated"),),
            (old_peg_pool, peg_pool),
        );
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;

        set_owner(&env, &new_owner);

        env.events()
            .publish((Symbol::new(&env, "owner_updated"),), (caller, new_owner));
        Ok(())
    }

    // === View Functions ===

    pub fn owner(env: Env) -> Result<Address, SynthError> {
        get_owner(&env)
    }

    pub fn peg_pool(env: Env) -> Result<Address, SynthError> {
        get_peg_pool(&env)
    }

    pub fn config(env: Env) -> Result<RouterConfig, SynthError> {
        get_config(&env)
    }
}

#[allow(clippy::too_many_arguments)]
fn swap_exact_input(
    env: &Env,
    config: &RouterConfig,
    caller: Address,
    token_in: Address,
    token_out: Address,
    amount_in: i128,
    min_amount_out: i128,
    sqrt_price_limit_x96: U256,
    deadline: Option<u64>,
) -> Result<i128, SynthError> {
    if amount_in <= 0 || min_amount_out < 0 {
        return Err(SynthError::OutOfRange);
    }

    let now = env.ledger().timestamp();
    let deadline = deadline.unwrap_or(now + DEFAULT_DEADLINE_SECS);
    check_deadline(env, deadline)?;

    let this = env.current_contract_address();
    let input = token::Client::new(env, &token_in);
    let held_before = input.balance(&this);

    settle(
        input.try_transfer(&caller, &this, &amount_in),
        SynthError::TransferFailure,
    )?;
    approve(env, &input, &config.swap_router, amount_in)?;

    let params = ExactInputSingleParams {
        sender: this.clone(),
        token_in: token_in.clone(),
        token_out: token_out.clone(),
        fee: config.fee,
        recipient: caller.clone(),
        deadline,
        amount_in,
        amount_out_minimum: min_amount_out,
        sqrt_price_limit_x96,
    };

    let amount_out = settle(
        SwapRouterClient::new(env, &config.swap_router).try_exact_input_single(&params),
        SynthError::SwapFailure,
    )?;
    if amount_out < min_amount_out {
        return Err(SynthError::InsufficientOutput);
    }

    refund(env, &input, &caller, input.balance(&this) - held_before)?;
    approve(env, &input, &config.swap_router, 0)?;

    env.events().publish(
        (Symbol::new(env, "swap_executed"),),
        (caller, token_in, token_out, amount_in, amount_out),
    );
    Ok(amount_out)
}

fn check_deadline(env: &Env, deadline: u64) -> Result<(), SynthError> {
    if env.ledger().timestamp() > deadline {
        return Err(SynthError::DeadlineExceeded);
    }
    Ok(())
}

/// Exact allowance for `spender`, valid for the current ledger only. Zero revokes it
fn approve(
    env: &Env,
    token: &token::Client,
    spender: &Address,
    amount: i128,
) -> Result<(), SynthError> {
    let expiration_ledger = env.ledger().sequence() + 1;
    settle(
        token.try_approve(&env.current_contract_address(), spender, &amount, &expiration_ledger),
        SynthError::TransferFailure,
    )
}

fn refund(
    env: &Env,
    token: &token::Client,
    to: &Address,
    amount: i128,
) -> Result<(), SynthError> {
    if amount <= 0 {
        return Ok(());
    }
    log!(env, "refunding unspent input", to.clone(), amount);
    settle(
        token.try_transfer(&env.current_contract_address(), to, &amount),
        SynthError::TransferFailure,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Events, Ledger};
    use soroban_sdk::token::StellarAssetClient;
    use soroban_sdk::{
        contract, contractimpl, contracttype, vec, Address, Env, IntoVal, String, Vec,
    };
    use synth_oracle::SynthOracle;
    use synth_reserve::{SynthReserve, SynthReserveClient};
    use synth_token::{SynthToken, SynthTokenClient};
    use synth_types::SYNTH_DECIMALS;

    const FEE: u32 = 3000;
    const TARGET: u32 = 12_000;
    const FUNDS: i128 = 1_000_000_000_000;
    const AMOUNT: i128 = 1_000_000;

    // ========================================================================
    // Mock collaborators
    // ========================================================================

    #[contracttype]
    #[derive(Clone)]
    enum MockKey {
        FillBps,
        PriceBps,
        LastSwap,
        LastMint,
        Pool,
        Tick,
    }

    fn fill_bps(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&MockKey::FillBps)
            .unwrap_or(10_000)
    }

    /// Swap router that consumes `fill_bps` of the input and pays out at `price_bps`
    #[contract]
    pub struct MockSwapRouter;

    #[contractimpl]
    impl MockSwapRouter {
        pub fn configure(env: Env, fill_bps: i128, price_bps: i128) {
            env.storage().instance().set(&MockKey::FillBps, &fill_bps);
            env.storage().instance().set(&MockKey::PriceBps, &price_bps);
        }

        pub fn exact_input_single(env: Env, params: ExactInputSingleParams) -> i128 {
            if env.ledger().timestamp() > params.deadline {
                panic!("Transaction expired");
            }
            let fill = fill_bps(&env);
            if fill == 0 {
                panic!("No liquidity");
            }
            let price: i128 = env
                .storage()
                .instance()
                .get(&MockKey::PriceBps)
                .unwrap_or(10_000);

            let this = env.current_contract_address();
            let pulled = params.amount_in * fill / 10_000;
            token::Client::new(&env, &params.token_in).transfer_from(
                &this,
                &params.sender,
                &this,
                &pulled,
            );
            let amount_out = pulled * price / 10_000;
            token::Client::new(&env, &params.token_out).transfer(
                &this,
                &params.recipient,
                &amount_out,
            );

            env.storage().instance().set(&MockKey::LastSwap, &params);
            amount_out
        }

        pub fn last_swap(env: Env) -> ExactInputSingleParams {
            env.storage().instance().get(&MockKey::LastSwap).unwrap()
        }
    }

    /// Position manager that consumes `fill_bps` of both desired amounts
    #[contract]
    pub struct MockPegPool;

    #[contractimpl]
    impl MockPegPool {
        pub fn set_pool(env: Env, pool: Address) {
            env.storage().instance().set(&MockKey::Pool, &pool);
        }

        pub fn set_fill_bps(env: Env, fill_bps: i128) {
            env.storage().instance().set(&MockKey::FillBps, &fill_bps);
        }

        pub fn mint(env: Env, params: MintParams) -> (u32, u128, i128, i128) {
            let fill = fill_bps(&env);
            let this = env.current_contract_address();
            let used0 = params.amount0_desired * fill / 10_000;
            let used1 = params.amount1_desired * fill / 10_000;

            token::Client::new(&env, &params.token0).transfer_from(
                &this,
                &params.payer,
                &this,
                &used0,
            );
            token::Client::new(&env, &params.token1).transfer_from(
                &this,
                &params.payer,
                &this,
                &used1,
            );

            env.storage().instance().set(&MockKey::LastMint, &params);
            (7, 1_000_000, used0, used1)
        }

        pub fn pool(env: Env) -> Address {
            env.storage().instance().get(&MockKey::Pool).unwrap()
        }

        pub fn last_mint(env: Env) -> MintParams {
            env.storage().instance().get(&MockKey::LastMint).unwrap()
        }
    }

    /// AMM pool sitting at a constant tick
    #[contract]
    pub struct MockPricePool;

    #[contractimpl]
    impl MockPricePool {
        pub fn set_tick(env: Env, tick: i64) {
            env.storage().instance().set(&MockKey::Tick, &tick);
        }

        pub fn observe(env: Env, seconds_agos: Vec<u32>) -> (Vec<i64>, Vec<U256>) {
            let tick: i64 = env.storage().instance().get(&MockKey::Tick).unwrap_or(0);
            let mut tick_cumulatives = Vec::new(&env);
            let mut seconds_per_liquidity = Vec::new(&env);
            for ago in seconds_agos.iter() {
                tick_cumulatives.push_back(1_000_000_000 - tick * i64::from(ago));
                seconds_per_liquidity.push_back(U256::from_u32(&env, 1_000_000 - ago));
            }
            (tick_cumulatives, seconds_per_liquidity)
        }
    }

    // ========================================================================
    // Fixture
    // ========================================================================

    struct TestEnv<'a> {
        env: Env,
        owner: Address,
        user: Address,
        synth: SynthTokenClient<'a>,
        collateral: token::Client<'a>,
        reserve: SynthReserveClient<'a>,
        router: SynthRouterClient<'a>,
        swap_router: MockSwapRouterClient<'a>,
        peg_pool: MockPegPoolClient<'a>,
        price_pool: MockPricePoolClient<'a>,
    }

    impl<'a> TestEnv<'a> {
        fn new() -> Self {
            let env = Env::default();
            env.mock_all_auths();

            let owner = Address::generate(&env);
            let user = Address::generate(&env);

            let sac = env.register_stellar_asset_contract_v2(owner.clone());
            let collateral_id = sac.address();
            let reserve_id = env.register(SynthReserve, ());
            let synth_id = env.register(SynthToken, ());
            let oracle_id = env.register(SynthOracle, ());
            let swap_router_id = env.register(MockSwapRouter, ());
            let peg_pool_id = env.register(MockPegPool, ());
            let price_pool_id = env.register(MockPricePool, ());
            let router_id = env.register(SynthRouter, ());

            let synth = SynthTokenClient::new(&env, &synth_id);
            synth.initialize(
                &reserve_id,
                &SYNTH_DECIMALS,
                &String::from_str(&env, "Synthetic Dollar"),
                &String::from_str(&env, "sUSD"),
            );

            let reserve = SynthReserveClient::new(&env, &reserve_id);
            reserve.initialize(&owner, &collateral_id, &synth_id, &router_id, &TARGET);

            let peg_pool = MockPegPoolClient::new(&env, &peg_pool_id);
            peg_pool.set_pool(&price_pool_id);

            let router = SynthRouterClient::new(&env, &router_id);
            router.initialize(
                &owner,
                &RouterConfig {
                    swap_router: swap_router_id.clone(),
                    oracle: oracle_id,
                    reserve: reserve_id,
                    synth: synth_id,
                    collateral: collateral_id.clone(),
                    fee: FEE,
                },
                &peg_pool_id,
            );

            // Balances: the user and the swap router hold both tokens
            let issuer = StellarAssetClient::new(&env, &collateral_id);
            issuer.mint(&owner, &FUNDS);
            issuer.mint(&user, &FUNDS);
            issuer.mint(&swap_router_id, &FUNDS);
            reserve.deposit_collateral(&owner, &FUNDS);
            reserve.mint_admin(&owner, &user, &FUNDS);
            reserve.mint_admin(&owner, &swap_router_id, &FUNDS);

            TestEnv {
                collateral: token::Client::new(&env, &collateral_id),
                swap_router: MockSwapRouterClient::new(&env, &swap_router_id),
                price_pool: MockPricePoolClient::new(&env, &price_pool_id),
                env,
                owner,
                user,
                synth,
                reserve,
                router,
                peg_pool,
            }
        }

        fn no_limit(&self) -> U256 {
            U256::from_u32(&self.env, 0)
        }

        fn assert_router_empty(&self) {
            assert_eq!(self.synth.balance(&self.router.address), 0);
            assert_eq!(self.collateral.balance(&self.router.address), 0);
        }
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize() {
        let t = TestEnv::new();

        let config = t.router.config();
        assert_eq!(config.fee, FEE);
        assert_eq!(config.synth, t.synth.address);
        assert_eq!(config.collateral, t.collateral.address);
        assert_eq!(config.reserve, t.reserve.address);
        assert_eq!(t.router.owner(), t.owner);
        assert_eq!(t.router.peg_pool(), t.peg_pool.address);
    }

    #[test]
    fn test_initialize_twice_fails() {
        let t = TestEnv::new();
        let config = t.router.config();

        let result = t
            .router
            .try_initialize(&t.owner, &config, &t.peg_pool.address);
        assert_eq!(result, Err(Ok(SynthError::AlreadyInitialized)));
    }

    #[test]
    fn test_initialize_rejects_unknown_fee() {
        let t = TestEnv::new();
        let mut config = t.router.config();
        config.fee = 100;

        let router = SynthRouterClient::new(&t.env, &t.env.register(SynthRouter, ()));
        let result = router.try_initialize(&t.owner, &config, &t.peg_pool.address);
        assert_eq!(result, Err(Ok(SynthError::OutOfRange)));
    }

    // === Swap Tests ===

    #[test]
    fn test_swap_synth_for_collateral() {
        let t = TestEnv::new();

        let out = t
            .router
            .swap_synth_for_collateral(&t.user, &AMOUNT, &AMOUNT, &t.no_limit(), &None);

        assert_eq!(out, AMOUNT);
        assert_eq!(t.synth.balance(&t.user), FUNDS - AMOUNT);
        assert_eq!(t.collateral.balance(&t.user), FUNDS + AMOUNT);
        t.assert_router_empty();

        let params = t.swap_router.last_swap();
        assert_eq!(params.sender, t.router.address);
        assert_eq!(params.recipient, t.user);
        assert_eq!(params.token_in, t.synth.address);
        assert_eq!(params.token_out, t.collateral.address);
        assert_eq!(params.fee, FEE);
        assert_eq!(params.deadline, DEFAULT_DEADLINE_SECS);
    }

    #[test]
    fn test_swap_collateral_for_synth() {
        let t = TestEnv::new();
        t.swap_router.configure(&10_000, &20_000);

        let out = t
            .router
            .swap_collateral_for_synth(&t.user, &AMOUNT, &0, &t.no_limit(), &None);

        assert_eq!(out, 2 * AMOUNT);
        assert_eq!(t.collateral.balance(&t.user), FUNDS - AMOUNT);
        assert_eq!(t.synth.balance(&t.user), FUNDS + 2 * AMOUNT);
        t.assert_router_empty();
    }

    #[test]
    fn test_swap_refunds_unspent_input() {
        let t = TestEnv::new();
        t.swap_router.configure(&5_000, &10_000);

        let out = t
            .router
            .swap_synth_for_collateral(&t.user, &AMOUNT, &0, &t.no_limit(), &None);

        assert_eq!(out, AMOUNT / 2);
        assert_eq!(t.synth.balance(&t.user), FUNDS - AMOUNT / 2);
        assert_eq!(t.synth.allowance(&t.router.address, &t.swap_router.address), 0);
        t.assert_router_empty();
    }

    #[test]
    fn test_swap_insufficient_output() {
        let t = TestEnv::new();
        t.swap_router.configure(&10_000, &9_000);

        let result = t.router.try_swap_synth_for_collateral(
            &t.user,
            &AMOUNT,
            &AMOUNT,
            &t.no_limit(),
            &None,
        );
        assert_eq!(result, Err(Ok(SynthError::InsufficientOutput)));
        assert_eq!(t.synth.balance(&t.user), FUNDS);
        assert_eq!(t.collateral.balance(&t.user), FUNDS);
    }

    #[test]
    fn test_swap_deadline_exceeded() {
        let t = TestEnv::new();
        t.env.ledger().with_mut(|li| li.timestamp = 1_000);

        let result = t.router.try_swap_collateral_for_synth(
            &t.user,
            &AMOUNT,
            &0,
            &t.no_limit(),
            &Some(999),
        );
        assert_eq!(result, Err(Ok(SynthError::DeadlineExceeded)));
    }

    #[test]
    fn test_swap_explicit_deadline_forwarded() {
        let t = TestEnv::new();
        t.env.ledger().with_mut(|li| li.timestamp = 1_000);

        t.router
            .swap_synth_for_collateral(&t.user, &AMOUNT, &0, &t.no_limit(), &Some(1_000));
        assert_eq!(t.swap_router.last_swap().deadline, 1_000);

        t.router
            .swap_synth_for_collateral(&t.user, &AMOUNT, &0, &t.no_limit(), &None);
        assert_eq!(t.swap_router.last_swap().deadline, 1_000 + DEFAULT_DEADLINE_SECS);
    }

    #[test]
    fn test_swap_failure_is_reported() {
        let t = TestEnv::new();
        t.swap_router.configure(&0, &10_000);

        let result = t.router.try_swap_synth_for_collateral(
            &t.user,
            &AMOUNT,
            &0,
            &t.no_limit(),
            &None,
        );
        assert_eq!(result, Err(Ok(SynthError::SwapFailure)));
        assert_eq!(t.synth.balance(&t.user), FUNDS);
    }

    #[test]
    fn test_swap_rejects_zero_amount() {
        let t = TestEnv::new();

        let result =
            t.router
                .try_swap_synth_for_collateral(&t.user, &0, &0, &t.no_limit(), &None);
        assert_eq!(result, Err(Ok(SynthError::OutOfRange)));
    }

    #[test]
    fn test_swap_pull_failure() {
        let t = TestEnv::new();
        let broke = Address::generate(&t.env);

        let result =
            t.router
                .try_swap_synth_for_collateral(&broke, &AMOUNT, &0, &t.no_limit(), &None);
        assert_eq!(result, Err(Ok(SynthError::TransferFailure)));
    }

    // === Liquidity Tests ===

    #[test]
    fn test_add_liquidity_full_range() {
        let t = TestEnv::new();

        let receipt = t.router.add_liquidity(&t.user, &AMOUNT, &(2 * AMOUNT));
        assert_eq!(receipt.position_id, 7);
        assert_eq!(receipt.liquidity, 1_000_000);

        let params = t.peg_pool.last_mint();
        assert!(params.token0 < params.token1);
        assert_eq!(params.tick_lower, -887220);
        assert_eq!(params.tick_upper, 887220);
        assert_eq!(params.fee, FEE);
        assert_eq!(params.payer, t.router.address);
        assert_eq!(params.recipient, t.user);

        let (synth_desired, collateral_desired) = if params.token0 == t.synth.address {
            (params.amount0_desired, params.amount1_desired)
        } else {
            (params.amount1_desired, params.amount0_desired)
        };
        assert_eq!(synth_desired, AMOUNT);
        assert_eq!(collateral_desired, 2 * AMOUNT);

        assert_eq!(t.synth.balance(&t.peg_pool.address), AMOUNT);
        assert_eq!(t.collateral.balance(&t.peg_pool.address), 2 * AMOUNT);
        t.assert_router_empty();
    }

    #[test]
    fn test_add_liquidity_refunds_unspent() {
        let t = TestEnv::new();
        t.peg_pool.set_fill_bps(&6_000);

        t.router.add_liquidity(&t.user, &AMOUNT, &AMOUNT);

        assert_eq!(t.synth.balance(&t.user), FUNDS - AMOUNT * 6 / 10);
        assert_eq!(t.collateral.balance(&t.user), FUNDS - AMOUNT * 6 / 10);
        assert_eq!(t.synth.allowance(&t.router.address, &t.peg_pool.address), 0);
        assert_eq!(t.collateral.allowance(&t.router.address, &t.peg_pool.address), 0);
        t.assert_router_empty();
    }

    #[test]
    fn test_add_liquidity_rejects_zero_amounts() {
        let t = TestEnv::new();

        assert_eq!(
            t.router.try_add_liquidity(&t.user, &0, &AMOUNT),
            Err(Ok(SynthError::OutOfRange))
        );
        assert_eq!(
            t.router.try_add_liquidity(&t.user, &AMOUNT, &0),
            Err(Ok(SynthError::OutOfRange))
        );
    }

    // === Issuance Tests ===

    #[test]
    fn test_mint_with_collateral() {
        let t = TestEnv::new();
        let synth_before = t.synth.balance(&t.user);
        let supply_before = t.reserve.synth_supply();

        // 1,200 collateral units at 120% issue 1,000 synth
        let issued = t.router.mint_with_collateral(&t.user, &1_200_000_000, &0);

        assert_eq!(issued, 1_000_000_000_000_000_000_000);
        assert_eq!(t.synth.balance(&t.user), synth_before + issued);
        assert_eq!(t.reserve.synth_supply(), supply_before + issued);
        assert_eq!(t.reserve.collateral_balance(), FUNDS + 1_200_000_000);
        t.assert_router_empty();
    }

    #[test]
    fn test_mint_with_collateral_min_out() {
        let t = TestEnv::new();

        let result = t
            .router
            .try_mint_with_collateral(&t.user, &1_200, &1_000_000_000_000_001);
        assert_eq!(result, Err(Ok(SynthError::InsufficientOutput)));
    }

    #[test]
    fn test_mint_with_collateral_forwards_reserve_error() {
        let t = TestEnv::new();
        let other = Address::generate(&t.env);
        t.reserve.set_router(&t.owner, &other);

        let result = t.router.try_mint_with_collateral(&t.user, &1_200, &0);
        assert_eq!(result, Err(Ok(SynthError::Unauthorized)));
        assert_eq!(t.collateral.balance(&t.user), FUNDS);
    }

    // === Pricing Tests ===

    #[test]
    fn test_quote_sqrt_price() {
        let t = TestEnv::new();
        t.price_pool.set_tick(&50);

        assert_eq!(
            t.router.quote_sqrt_price(&600),
            U256::from_u128(&t.env, 79426470787362580746886972461)
        );
    }

    #[test]
    fn test_quote_sqrt_price_forwards_oracle_error() {
        let t = TestEnv::new();

        assert_eq!(
            t.router.try_quote_sqrt_price(&0),
            Err(Ok(SynthError::OutOfRange))
        );
    }

    // === Administration Tests ===

    #[test]
    fn test_set_peg_pool() {
        let t = TestEnv::new();
        let new_peg_pool = Address::generate(&t.env);

        t.router.set_peg_pool(&t.owner, &new_peg_pool);
        assert_eq!(
            t.env.events().all(),
            vec![
                &t.env,
                (
                    t.router.address.clone(),
                    (Symbol::new(&t.env, "peg_pool_updated"),).into_val(&t.env),
                    (t.peg_pool.address.clone(), new_peg_pool.clone()).into_val(&t.env),
                ),
            ]
        );
        assert_eq!(t.router.peg_pool(), new_peg_pool);

        assert_eq!(
            t.router.try_set_peg_pool(&t.user, &t.user),
            Err(Ok(SynthError::Unauthorized))
        );
    }

    #[test]
    fn test_transfer_ownership() {
        let t = TestEnv::new();

        t.router.transfer_ownership(&t.owner, &t.user);
        assert_eq!(t.router.owner(), t.user);
        assert_eq!(
            t.router.try_transfer_ownership(&t.owner, &t.owner),
            Err(Ok(SynthError::Unauthorized))
        );
    }

    // === Execution Guard Tests ===

    #[test]
    fn test_nested_call_rejected_while_locked() {
        let t = TestEnv::new();
        let env = t.env.clone();
        let user = t.user.clone();

        env.as_contract(&t.router.address, || {
            let _guard = ExecutionGuard::acquire(&env).unwrap();

            let swap = SynthRouter::swap_synth_for_collateral(
                env.clone(),
                user.clone(),
                AMOUNT,
                0,
                U256::from_u32(&env, 0),
                None,
            );
            assert_eq!(swap, Err(SynthError::Reentrancy));

            let reverse = SynthRouter::swap_collateral_for_synth(
                env.clone(),
                user.clone(),
                AMOUNT,
                0,
                U256::from_u32(&env, 0),
                None,
            );
            assert_eq!(reverse, Err(SynthError::Reentrancy));

            let mint = SynthRouter::mint_with_collateral(env.clone(), user.clone(), AMOUNT, 0);
            assert_eq!(mint, Err(SynthError::Reentrancy));

            let seed = SynthRouter::add_liquidity(env.clone(), user.clone(), AMOUNT, AMOUNT);
            assert_eq!(seed, Err(SynthError::Reentrancy));
        });
    }

    #[test]
    fn test_guard_released_after_each_call() {
        let t = TestEnv::new();
        t.env.ledger().with_mut(|li| li.timestamp = 1_000);

        let failed = t.router.try_swap_synth_for_collateral(
            &t.user,
            &AMOUNT,
            &0,
            &t.no_limit(),
            &Some(1),
        );
        assert_eq!(failed, Err(Ok(SynthError::DeadlineExceeded)));

        t.router
            .swap_synth_for_collateral(&t.user, &AMOUNT, &0, &t.no_limit(), &None);
        let locked = t
            .env
            .as_contract(&t.router.address, || guard::is_locked(&t.env));
        assert!(!locked);
    }
}
