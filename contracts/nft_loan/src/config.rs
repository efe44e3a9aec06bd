//! Admin-controlled configuration: admin identity, fee token, fee rates and
//! the borrow-token whitelist. Everything lives in instance storage.

use crate::events;
use crate::types::{DataKey, FeeRates};
use nft_loan_errors::ContractError;
use soroban_sdk::{Address, Env, Symbol};

/// Default admin rate for trade, flash-loan and redeem fees (0.3 %).
pub const DEFAULT_FEE_BPS: u32 = 30;

/// Upper bound for any fee rate (100 %).
pub const MAX_FEE_BPS: u32 = 10_000;

pub fn initialize(e: &Env, admin: &Address, fee_token: &Address) -> Result<(), ContractError> {
    if e.storage().instance().has(&DataKey::Admin) {
        return Err(ContractError::AlreadyInitialized);
    }
    e.storage().instance().set(&DataKey::Admin, admin);
    e.storage().instance().set(&DataKey::FeeToken, fee_token);
    e.storage().instance().set(
        &DataKey::FeeRates,
        &FeeRates {
            trade_bps: DEFAULT_FEE_BPS,
            flash_loan_bps: DEFAULT_FEE_BPS,
            redeem_bps: DEFAULT_FEE_BPS,
        },
    );
    events::emit_initialized(e, admin, fee_token);
    Ok(())
}

pub fn admin(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

pub fn require_initialized(e: &Env) -> Result<(), ContractError> {
    admin(e).map(|_| ())
}

/// Checks `caller` is the stored admin and requires its authorization.
pub fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let stored = admin(e)?;
    if stored != *caller {
        return Err(ContractError::NotAdmin);
    }
    caller.require_auth();
    Ok(())
}

pub fn transfer_admin(e: &Env, admin: &Address, new_admin: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Admin, new_admin);
    events::emit_admin_transferred(e, admin, new_admin);
    Ok(())
}

pub fn fee_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::FeeToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn fee_rates(e: &Env) -> Result<FeeRates, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::FeeRates)
        .ok_or(ContractError::NotInitialized)
}

/// Admin-only update of one rate. `kind` is one of `trade`, `flash_loan`, `redeem`
/// and is echoed in the `fee_rate_set` event.
pub fn set_fee_rate<F>(
    e: &Env,
    admin: &Address,
    kind: &str,
    bps: u32,
    apply: F,
) -> Result<FeeRates, ContractError>
where
    F: FnOnce(&mut FeeRates, u32),
{
    require_admin(e, admin)?;
    if bps > MAX_FEE_BPS {
        return Err(ContractError::InvalidFeeRate);
    }
    let mut rates = fee_rates(e)?;
    apply(&mut rates, bps);
    e.storage().instance().set(&DataKey::FeeRates, &rates);
    events::emit_fee_rate_set(e, &Symbol::new(e, kind), bps);
    Ok(rates)
}

pub fn is_whitelisted(e: &Env, token: &Address) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Whitelist(token.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(
    e: &Env,
    admin: &Address,
    token: &Address,
    listed: bool,
) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    let key = DataKey::Whitelist(token.clone());
    if listed {
        e.storage().instance().set(&key, &true);
    } else {
        e.storage().instance().remove(&key);
    }
    events::emit_whitelist_changed(e, token, listed);
    Ok(())
}
