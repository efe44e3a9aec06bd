//! # IOU Lifecycle
//!
//! A depositor can use a custodied NFT as collateral for a fixed-term loan:
//!
//! ```text
//! None --apply--> Proposed --accept--> Active --redeem--> None
//!                    |                    \---claim----> None (accepter becomes depositor)
//!                    \--cancel--> None
//! ```
//!
//! The IOU is stored inside the custody record, so withdrawing is blocked
//! until its status is back to `None`.

use crate::types::{CustodyRecord, IouRecord, IouStatus};
use crate::{config, custody, events, math, value};
use nft_loan_errors::ContractError;
use soroban_sdk::{Address, Env};

fn iou_in_status(record: &CustodyRecord, status: IouStatus) -> Result<IouRecord, ContractError> {
    if record.iou.status != status {
        return Err(ContractError::InvalidIouStatus);
    }
    Ok(record.iou.clone())
}

#[allow(clippy::too_many_arguments)]
pub fn apply(
    e: &Env,
    caller: &Address,
    collection: &Address,
    id: u64,
    token: &Address,
    amount: i128,
    fee: i128,
    duration: u64,
) -> Result<(), ContractError> {
    let mut record = custody::require_depositor(e, caller, collection, id)?;
    if !config::is_whitelisted(e, token) {
        return Err(ContractError::TokenNotWhitelisted);
    }
    if record.iou_status() != IouStatus::None {
        return Err(ContractError::IouExists);
    }
    if amount <= 0 || fee < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if duration == 0 {
        return Err(ContractError::InvalidDuration);
    }

    record.iou = IouRecord {
        status: IouStatus::Proposed,
        borrow_token: Some(token.clone()),
        borrow_amount: amount,
        borrow_fee: fee,
        borrow_duration: duration,
        accepter: None,
        borrow_deadline: 0,
    };
    custody::write(e, collection, id, &record);
    events::emit_iou_applied(e, collection, id, token, amount, fee, duration);
    Ok(())
}

pub fn cancel(e: &Env, caller: &Address, collection: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = custody::require_depositor(e, caller, collection, id)?;
    iou_in_status(&record, IouStatus::Proposed)?;

    record.iou = IouRecord::empty();
    custody::write(e, collection, id, &record);
    events::emit_iou_cancelled(e, collection, id);
    Ok(())
}

/// Fund a proposed IOU. The accepter pays the principal to the depositor and
/// the trade fee to the admin, both drawn from its allowance to the vault.
/// Returns the borrow deadline.
pub fn accept(e: &Env, caller: &Address, collection: &Address, id: u64) -> Result<u64, ContractError> {
    let mut record = custody::read(e, collection, id).ok_or(ContractError::InvalidIouStatus)?;
    if record.depositor == *caller {
        return Err(ContractError::SelfDealingDenied);
    }
    let mut iou = iou_in_status(&record, IouStatus::Proposed)?;
    let token = iou.borrow_token.clone().ok_or(ContractError::InvalidIouStatus)?;

    let admin = config::admin(e)?;
    let admin_fee = math::bps(iou.borrow_amount, config::fee_rates(e)?.trade_bps)?;
    let total = math::add_i128(iou.borrow_amount, admin_fee)?;
    value::require_allowance(e, &token, caller, total)?;

    let deadline = math::add_u64(e.ledger().timestamp(), iou.borrow_duration)?;

    value::transfer_with_allowance(e, &token, caller, &record.depositor, iou.borrow_amount);
    value::transfer_with_allowance(e, &token, caller, &admin, admin_fee);

    iou.status = IouStatus::Active;
    iou.accepter = Some(caller.clone());
    iou.borrow_deadline = deadline;
    record.iou = iou;
    record.flash_fee_receiver = caller.clone();
    custody::write(e, collection, id, &record);

    events::emit_iou_accepted(e, collection, id, caller, deadline);
    Ok(deadline)
}

/// Repay an active IOU before its deadline. The depositor pays principal plus
/// borrow fee to the accepter and the redeem fee on that sum to the admin.
pub fn redeem(e: &Env, caller: &Address, collection: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = custody::require_depositor(e, caller, collection, id)?;
    let iou = iou_in_status(&record, IouStatus::Active)?;
    if e.ledger().timestamp() >= iou.borrow_deadline {
        return Err(ContractError::LoanExpired);
    }
    let accepter = iou.accepter.clone().ok_or(ContractError::InvalidIouStatus)?;
    let token = iou.borrow_token.clone().ok_or(ContractError::InvalidIouStatus)?;

    let admin = config::admin(e)?;
    let repayment = math::add_i128(iou.borrow_amount, iou.borrow_fee)?;
    let redeem_fee = math::bps(repayment, config::fee_rates(e)?.redeem_bps)?;
    value::require_allowance(e, &token, caller, math::add_i128(repayment, redeem_fee)?)?;

    value::transfer_with_allowance(e, &token, caller, &accepter, repayment);
    value::transfer_with_allowance(e, &token, caller, &admin, redeem_fee);

    record.iou = IouRecord::empty();
    record.flash_fee_receiver = record.depositor.clone();
    custody::write(e, collection, id, &record);

    events::emit_iou_redeemed(e, collection, id, &accepter, repayment);
    Ok(())
}

/// Take over a defaulted IOU's collateral. The accepter becomes the depositor
/// of record; the NFT itself stays in custody.
pub fn claim(e: &Env, caller: &Address, collection: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = custody::read(e, collection, id).ok_or(ContractError::InvalidIouStatus)?;
    let iou = iou_in_status(&record, IouStatus::Active)?;
    if iou.accepter.as_ref() != Some(caller) {
        return Err(ContractError::NotOwner);
    }
    if e.ledger().timestamp() < iou.borrow_deadline {
        return Err(ContractError::LoanNotExpired);
    }

    record.depositor = caller.clone();
    record.flash_fee_receiver = caller.clone();
    record.iou = IouRecord::empty();
    custody::write(e, collection, id, &record);

    events::emit_iou_claimed(e, collection, id, caller);
    Ok(())
}
