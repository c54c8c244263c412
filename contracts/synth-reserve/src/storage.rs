use soroban_sdk::{contracttype, Address, Env};
use synth_types::{SynthError, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD};

/// Fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveConfig {
    pub collateral: Address,
    pub synth: Address,
    pub target_ratio_bps: u32,
}

/// Storage keys for the reserve contract (all Instance storage)
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Owner,
    /// Only address allowed through `mint_authorized`
    Router,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<ReserveConfig, SynthError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_config(env: &Env, config: &ReserveConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Roles ===

pub fn get_owner(env: &Env) -> Result<Address, SynthError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_router(env: &Env) -> Result<Address, SynthError> {
    env.storage()
        .instance()
        .get(&DataKey::Router)
        .ok_or(SynthError::NotInitialized)
}

pub fn set_router(env: &Env, router: &Address) {
    env.storage().instance().set(&DataKey::Router, router);
}

/// Authenticate `caller` and check it holds the owner role
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), SynthError> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(SynthError::Unauthorized);
    }
    Ok(())
}
