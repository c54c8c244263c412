use crate::storage::DataKey;
use soroban_sdk::Env;
use synth_types::SynthError;

/// Single-flight lock for the router's fund-moving operations.
///
/// Acquiring writes `DataKey::Locked`; dropping the guard removes it, so the
/// lock is released on every return path. A trap rolls the write back with
/// the rest of the invocation.
pub struct ExecutionGuard<'a> {
    env: &'a Env,
}

impl<'a> ExecutionGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, SynthError> {
        if is_locked(env) {
            return Err(SynthError::Reentrancy);
        }
        env.storage().instance().set(&DataKey::Locked, &true);
        Ok(ExecutionGuard { env })
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::Locked);
    }
}

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Locked)
}
