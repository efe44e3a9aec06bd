//! # Custody Registry
//!
//! One `CustodyRecord` per (collection, id) held by the vault. Records live in
//! persistent storage and are bumped on every write; the matching NFT is owned
//! by the vault for as long as the record exists.
//!
//! Batch variants are all-or-nothing: any element failing returns an error and
//! the host discards every transfer and write made by the call.

use crate::types::{CustodyRecord, DataKey, IouRecord, IouStatus};
use crate::{events, freeze, nft};
use nft_loan_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

const DAY_IN_LEDGERS: u32 = 17_280;
const RECORD_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const RECORD_LIFETIME_THRESHOLD: u32 = RECORD_BUMP_AMOUNT - DAY_IN_LEDGERS;

fn key(collection: &Address, id: u64) -> DataKey {
    DataKey::Custody(collection.clone(), id)
}

pub fn read(e: &Env, collection: &Address, id: u64) -> Option<CustodyRecord> {
    e.storage().persistent().get(&key(collection, id))
}

pub fn write(e: &Env, collection: &Address, id: u64, record: &CustodyRecord) {
    let key = key(collection, id);
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
}

fn remove(e: &Env, collection: &Address, id: u64) {
    e.storage().persistent().remove(&key(collection, id));
}

/// Load the record and check `caller` is its depositor. A missing record is
/// reported as `NotOwner` too.
pub fn require_depositor(
    e: &Env,
    caller: &Address,
    collection: &Address,
    id: u64,
) -> Result<CustodyRecord, ContractError> {
    match read(e, collection, id) {
        Some(record) if record.depositor == *caller => Ok(record),
        _ => Err(ContractError::NotOwner),
    }
}

pub fn deposit(
    e: &Env,
    caller: &Address,
    collection: &Address,
    id: u64,
    fee: i128,
) -> Result<(), ContractError> {
    freeze::require_not_frozen(e)?;
    if fee < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if read(e, collection, id).is_some() {
        return Err(ContractError::AlreadyCustodied);
    }

    nft::pull_into_custody(e, collection, caller, id)?;

    let record = CustodyRecord {
        depositor: caller.clone(),
        flash_fee: fee,
        flash_fee_receiver: caller.clone(),
        iou: IouRecord::empty(),
    };
    write(e, collection, id, &record);
    if fee > 0 {
        events::emit_flash_fee_set(e, collection, id, fee);
    }
    events::emit_deposited(e, collection, id, caller, fee);
    Ok(())
}

/// Deposit `ids[i]` with flash fee `fees[i]`. A repeated id fails on its
/// second occurrence with `AlreadyCustodied`.
pub fn deposit_batch(
    e: &Env,
    caller: &Address,
    collection: &Address,
    ids: &Vec<u64>,
    fees: &Vec<i128>,
) -> Result<u32, ContractError> {
    if ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if ids.len() != fees.len() {
        return Err(ContractError::BatchLengthMismatch);
    }
    for (id, fee) in ids.iter().zip(fees.iter()) {
        deposit(e, caller, collection, id, fee)?;
    }
    Ok(ids.len())
}

pub fn withdraw(e: &Env, caller: &Address, collection: &Address, id: u64) -> Result<(), ContractError> {
    let record = require_depositor(e, caller, collection, id)?;
    if record.iou_status() != IouStatus::None {
        return Err(ContractError::CollateralEncumbered);
    }

    remove(e, collection, id);
    nft::send_from_custody(e, collection, &record.depositor, id);
    events::emit_withdrawn(e, collection, id, &record.depositor);
    Ok(())
}

pub fn withdraw_batch(
    e: &Env,
    caller: &Address,
    collection: &Address,
    ids: &Vec<u64>,
) -> Result<u32, ContractError> {
    if ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    for id in ids.iter() {
        withdraw(e, caller, collection, id)?;
    }
    Ok(ids.len())
}

/// Zero disables flash loans for the asset. Locked while an IOU is attached,
/// since the lender may be the fee receiver.
pub fn set_flash_fee(
    e: &Env,
    caller: &Address,
    collection: &Address,
    id: u64,
    fee: i128,
) -> Result<(), ContractError> {
    if fee < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let mut record = require_depositor(e, caller, collection, id)?;
    if record.iou_status() != IouStatus::None {
        return Err(ContractError::CollateralEncumbered);
    }
    record.flash_fee = fee;
    write(e, collection, id, &record);
    events::emit_flash_fee_set(e, collection, id, fee);
    Ok(())
}
