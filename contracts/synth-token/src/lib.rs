#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};
use storage::{
    get_admin, get_metadata, get_total_supply, has_admin, read_allowance, read_balance,
    receive_balance, set_admin, set_metadata, set_total_supply, spend_allowance, spend_balance,
    write_allowance, TokenMetadata,
};
use synth_types::SynthError;

/// SEP-41 fungible token for the synthetic asset. The admin (the reserve
/// contract in production) is the only account that can create supply or
/// claw it back.
#[contract]
pub struct SynthToken;

fn check_nonnegative_amount(amount: i128) -> Result<(), SynthError> {
    if amount < 0 {
        return Err(SynthError::OutOfRange);
    }
    Ok(())
}

#[contractimpl]
impl SynthToken {
    /// Initialize token metadata and issuance authority
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), SynthError> {
        if has_admin(&env) {
            return Err(SynthError::AlreadyInitialized);
        }

        set_admin(&env, &admin);
        set_metadata(
            &env,
            &TokenMetadata {
                decimals,
                name,
                symbol,
            },
        );
        set_total_supply(&env, 0);
        Ok(())
    }

    // === Issuance (admin only) ===

    /// Create `amount` new tokens for `to`
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), SynthError> {
        check_nonnegative_amount(amount)?;
        let admin = get_admin(&env)?;
        admin.require_auth();

        let supply = get_total_supply(&env)
            .checked_add(amount)
            .ok_or(SynthError::Overflow)?;
        receive_balance(&env, &to, amount)?;
        set_total_supply(&env, supply);

        env.events()
            .publish((Symbol::new(&env, "mint"), admin, to), amount);
        Ok(())
    }

    /// Destroy `amount` of `from`'s balance without the holder's signature
    pub fn clawback(env: Env, from: Address, amount: i128) -> Result<(), SynthError> {
        check_nonnegative_amount(amount)?;
        let admin = get_admin(&env)?;
        admin.require_auth();

        spend_balance(&env, &from, amount)?;
        set_total_supply(&env, get_total_supply(&env) - amount);

        env.events()
            .publish((Symbol::new(&env, "clawback"), admin, from), amount);
        Ok(())
    }

    /// Hand issuance authority to a new admin
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), SynthError> {
        let admin = get_admin(&env)?;
        admin.require_auth();

        set_admin(&env, &new_admin);

        env.events()
            .publish((Symbol::new(&env, "set_admin"), admin), new_admin);
        Ok(())
    }

    // === SEP-41 ===

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender).amount
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), SynthError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;

        write_allowance(&env, &from, &spender, amount, expiration_ledger)?;

        env.events().publish(
            (Symbol::new(&env, "approve"), from, spender),
            (amount, expiration_ledger),
        );
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), SynthError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;

        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), SynthError> {
        spender.require_auth();
        check_nonnegative_amount(amount)?;

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), SynthError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;

        spend_balance(&env, &from, amount)?;
        set_total_supply(&env, get_total_supply(&env) - amount);

        env.events()
            .publish((Symbol::new(&env, "burn"), from), amount);
        Ok(())
    }

    pub fn burn_from(
        env: Env,
        spender: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), SynthError> {
        spender.require_auth();
        check_nonnegative_amount(amount)?;

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        set_total_supply(&env, get_total_supply(&env) - amount);

        env.events()
            .publish((Symbol::new(&env, "burn"), from), amount);
        Ok(())
    }

    // === View Functions ===

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn admin(env: Env) -> Result<Address, SynthError> {
        get_admin(&env)
    }

    pub fn decimals(env: Env) -> Result<u32, SynthError> {
        Ok(get_metadata(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, SynthError> {
        Ok(get_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, SynthError> {
        Ok(get_metadata(&env)?.symbol)
    }
}
