//! Reentrancy guard shared by every mutating entry point.
//!
//! The lock is a single instance-storage flag. A call that finds it held is
//! rejected with `ReentrantCall`; nothing ever waits for it.

use crate::types::DataKey;
use nft_loan_errors::ContractError;
use soroban_sdk::Env;

pub fn is_locked(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Lock).unwrap_or(false)
}

fn acquire_lock(e: &Env) -> Result<(), ContractError> {
    if is_locked(e) {
        return Err(ContractError::ReentrantCall);
    }
    e.storage().instance().set(&DataKey::Lock, &true);
    Ok(())
}

fn release_lock(e: &Env) {
    e.storage().instance().set(&DataKey::Lock, &false);
}

/// Run `f` holding the lock. The lock is released whether `f` succeeds or fails.
pub fn with_reentrancy_guard<T, F>(e: &Env, f: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    acquire_lock(e)?;
    let result = f();
    release_lock(e);
    result
}
