use crate::{events, types::DataKey};
use nft_loan_errors::ContractError;
use soroban_sdk::{Address, Env};

pub fn is_frozen(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Frozen).unwrap_or(false)
}

/// Deposits and flash loans call this; withdrawals never do.
pub fn require_not_frozen(e: &Env) -> Result<(), ContractError> {
    if is_frozen(e) {
        return Err(ContractError::SystemFrozen);
    }
    Ok(())
}

/// Caller must already have passed `config::require_admin`.
pub fn set_frozen(e: &Env, admin: &Address, frozen: bool) {
    e.storage().instance().set(&DataKey::Frozen, &frozen);
    events::emit_freeze_changed(e, admin, frozen);
}
