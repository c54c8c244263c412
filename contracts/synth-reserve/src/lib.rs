#![no_std]

#[cfg(feature = "certora")]
pub mod certora_specs;
mod storage;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};
use storage::{
    get_config, get_owner, get_router, is_initialized, require_owner, set_config, set_owner,
    set_router,
};
use synth_math::{check_mint, collateral_ratio_bps, max_mintable};
use synth_types::{settle, SynthError, SynthTokenClient, BPS_DENOMINATOR};

pub use storage::ReserveConfig;

/// Custodian of the collateral and sole issuer of the synthetic token.
///
/// Every mint that goes through the registered router must leave
/// `collateral * 10000 / (supply / 1e12)` at or above the target ratio.
#[contract]
pub struct SynthReserve;

#[contractimpl]
impl SynthReserve {
    /// Initialize the reserve. The synthetic token's admin must already be
    /// this contract for mints and burns to succeed.
    pub fn initialize(
        env: Env,
        owner: Address,
        collateral: Address,
        synth: Address,
        router: Address,
        target_ratio_bps: u32,
    ) -> Result<(), SynthError> {
        if is_initialized(&env) {
            return Err(SynthError::AlreadyInitialized);
        }

        // Under 100% the reserve could never back its own supply
        if i128::from(target_ratio_bps) < BPS_DENOMINATOR {
            return Err(SynthError::OutOfRange);
        }

        set_config(
            &env,
            &ReserveConfig {
                collateral,
                synth,
                target_ratio_bps,
            },
        );
        set_owner(&env, &owner);
        set_router(&env, &router);
        Ok(())
    }

    // === Collateral custody (owner only) ===

    /// Pull `amount` of collateral from the owner into the reserve
    pub fn deposit_collateral(env: Env, caller: Address, amount: i128) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let collateral = token::Client::new(&env, &config.collateral);
        settle(
            collateral.try_transfer(&caller, &env.current_contract_address(), &amount),
            SynthError::TransferFailure,
        )?;

        env.events().publish(
            (Symbol::new(&env, "collateral_deposited"),),
            (caller, amount),
        );
        Ok(())
    }

    /// Push `amount` of collateral out of the reserve to `to`
    pub fn withdraw_collateral(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let collateral = token::Client::new(&env, &config.collateral);
        let custody = collateral.balance(&env.current_contract_address());
        if custody < amount {
            return Err(SynthError::TransferFailure);
        }

        settle(
            collateral.try_transfer(&env.current_contract_address(), &to, &amount),
            SynthError::TransferFailure,
        )?;

        env.events().publish(
            (Symbol::new(&env, "collateral_withdrawn"),),
            (caller, to, amount),
        );
        Ok(())
    }

    // === Issuance ===

    /// Mint on behalf of the registered router, subject to the collateral check
    pub fn mint_authorized(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), SynthError> {
        caller.require_auth();
        if caller != get_router(&env)? {
            return Err(SynthError::Unauthorized);
        }
        if amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let synth = SynthTokenClient::new(&env, &config.synth);
        let collateral = collateral_balance(&env, &config);

        if let Err(err) = check_mint(
            collateral,
            synth.total_supply(),
            amount,
            config.target_ratio_bps,
        ) {
            log!(&env, "mint rejected by collateral check", amount, collateral);
            return Err(err);
        }

        settle(synth.try_mint(&to, &amount), SynthError::TransferFailure)?;

        env.events()
            .publish((Symbol::new(&env, "minted"),), (caller, to, amount));
        Ok(())
    }

    /// Owner mint that skips the collateral check
    pub fn mint_admin(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let synth = SynthTokenClient::new(&env, &config.synth);
        settle(synth.try_mint(&to, &amount), SynthError::TransferFailure)?;

        log!(&env, "admin mint bypassed collateral check", to, amount);
        env.events()
            .publish((Symbol::new(&env, "admin_minted"),), (caller, to, amount));
        Ok(())
    }

    /// Destroy `amount` of synth held by `from`
    pub fn burn(env: Env, caller: Address, from: Address, amount: i128) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(SynthError::OutOfRange);
        }

        let config = get_config(&env)?;
        let synth = SynthTokenClient::new(&env, &config.synth);
        settle(synth.try_clawback(&from, &amount), SynthError::TransferFailure)?;

        env.events()
            .publish((Symbol::new(&env, "burned"),), (caller, from, amount));
        Ok(())
    }

    // === Administration ===

    pub fn set_router(env: Env, caller: Address, new_router: Address) -> Result<(), SynthError> {
        require_owner(&env, &caller)?;

        let old_router = get_router(&env)?;
        set_router(&env, &new_router);

        env.events().publish(
            (Symbol::new(&env, "router_updated"),),
            (old_router, new_router),
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

    /// Current ratio in basis points; `u128::MAX` while the scaled supply is zero
    pub fn collateralization_ratio(env: Env) -> Result<u128, SynthError> {
        let config = get_config(&env)?;
        let supply = SynthTokenClient::new(&env, &config.synth).total_supply();

        match collateral_ratio_bps(collateral_balance(&env, &config), supply)? {
            Some(ratio) => u128::try_from(ratio).map_err(|_| SynthError::Overflow),
            None => Ok(u128::MAX),
        }
    }

    /// Largest amount `mint_authorized` would accept right now
    pub fn max_mintable(env: Env) -> Result<i128, SynthError> {
        let config = get_config(&env)?;
        let supply = SynthTokenClient::new(&env, &config.synth).total_supply();
        max_mintable(
            collateral_balance(&env, &config),
            supply,
            config.target_ratio_bps,
        )
    }

    pub fn collateral_balance(env: Env) -> Result<i128, SynthError> {
        let config = get_config(&env)?;
        Ok(collateral_balance(&env, &config))
    }

    pub fn synth_supply(env: Env) -> Result<i128, SynthError> {
        let config = get_config(&env)?;
        Ok(SynthTokenClient::new(&env, &config.synth).total_supply())
    }

    pub fn owner(env: Env) -> Result<Address, SynthError> {
        get_owner(&env)
    }

    pub fn router(env: Env) -> Result<Address, SynthError> {
        get_router(&env)
    }

    pub fn collateral_token(env: Env) -> Result<Address, SynthError> {
        Ok(get_config(&env)?.collateral)
    }

    pub fn synth_token(env: Env) -> Result<Address, SynthError> {
        Ok(get_config(&env)?.synth)
    }

    pub fn target_ratio_bps(env: Env) -> Result<u32, SynthError> {
        Ok(get_config(&env)?.target_ratio_bps)
    }
}

fn collateral_balance(env: &Env, config: &ReserveConfig) -> i128 {
    token::Client::new(env, &config.collateral).balance(&env.current_contract_address())
}
