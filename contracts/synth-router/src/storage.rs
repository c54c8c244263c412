use soroban_sdk::{contracttype, Address, Env};
use synth_types::{SynthError, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD};

/// Collaborators and pool fee, fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouterConfig {
    /// External single-hop swap router
    pub swap_router: Address,
    /// TWAP oracle (synth-oracle)
    pub oracle: Address,
    /// Collateral reserve (synth-reserve)
    pub reserve: Address,
    pub synth: Address,
    pub collateral: Address,
    /// Fee tier of the synth/collateral pool
    pub fee: u32,
}

/// Storage keys for the router contract (all Instance storage)
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Owner,
    /// Liquidity seeding entry point for the synth/collateral pool
    PegPool,
    /// Present while a guarded operation is executing
    Locked,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<RouterConfig, SynthError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_config(env: &Env, config: &RouterConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_owner(env: &Env) -> Result<Address, SynthError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_peg_pool(env: &Env) -> Result<Address, SynthError> {
    env.storage()
        .instance()
        .get(&DataKey::PegPool)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_peg_pool(env: &Env, peg_pool: &Address) {
    env.storage().instance().set(&DataKey::PegPool, peg_pool);
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), SynthError> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(SynthError::Unauthorized);
    }
    Ok(())
}
