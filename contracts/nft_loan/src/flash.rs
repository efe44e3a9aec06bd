//! # Flash Lending Engine
//!
//! Lends a batch of custodied NFTs to an operator for the duration of a single
//! callback. The initiator pays the summed flash fees up front in the fee
//! token; once the callback returns and every asset is back in the vault, the
//! admin takes its rate on the summed fee plus any excess payment, and the
//! assets' fee receivers share the rest.
//!
//! Any failure (missing asset, short payment, operator error) returns an
//! error, which makes the host revert the loans and the fee pull together.

use crate::types::CustodyRecord;
use crate::{config, custody, events, freeze, math, nft, value};
use nft_loan_errors::ContractError;
use soroban_sdk::{Address, Bytes, Env, Map, Vec};

/// Validate the batch and load each record. Ids without a record, with a zero
/// flash fee, or repeated within the batch are rejected.
fn load_lendable(
    e: &Env,
    collection: &Address,
    ids: &Vec<u64>,
) -> Result<Vec<CustodyRecord>, ContractError> {
    let mut seen: Map<u64, bool> = Map::new(e);
    let mut records = Vec::new(e);
    for id in ids.iter() {
        if seen.contains_key(id) {
            return Err(ContractError::FlashDisabled);
        }
        seen.set(id, true);

        let record = custody::read(e, collection, id).ok_or(ContractError::FlashDisabled)?;
        if record.flash_fee <= 0 {
            return Err(ContractError::FlashDisabled);
        }
        records.push_back(record);
    }
    Ok(records)
}

fn total_fee(records: &Vec<CustodyRecord>) -> Result<i128, ContractError> {
    let mut total: i128 = 0;
    for record in records.iter() {
        total = math::add_i128(total, record.flash_fee)?;
    }
    Ok(total)
}

pub fn flash_loan(
    e: &Env,
    initiator: &Address,
    collection: &Address,
    ids: &Vec<u64>,
    operator: &Address,
    payment: i128,
    data: &Bytes,
) -> Result<(), ContractError> {
    freeze::require_not_frozen(e)?;
    if ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if payment < 0 {
        return Err(ContractError::InvalidAmount);
    }

    let records = load_lendable(e, collection, ids)?;
    let total = total_fee(&records)?;
    if payment < total {
        return Err(ContractError::InsufficientFee);
    }

    let fee_token = config::fee_token(e)?;
    value::collect(e, &fee_token, initiator, payment);

    for id in ids.iter() {
        nft::send_from_custody(e, collection, operator, id);
    }
    nft::notify_operator(e, operator, collection, ids, initiator, data);
    for id in ids.iter() {
        if !nft::is_held_by_vault(e, collection, id) {
            return Err(ContractError::FlashNotReturned);
        }
    }

    let admin = config::admin(e)?;
    let rate = config::fee_rates(e)?.flash_loan_bps;
    let mut settled_fees: i128 = 0;
    let mut distributed: i128 = 0;
    for (id, record) in ids.iter().zip(records.iter()) {
        let due = receivers_due(settled_fees, record.flash_fee, rate)?;
        settled_fees = math::add_i128(settled_fees, record.flash_fee)?;
        value::pay(e, &fee_token, &record.flash_fee_receiver, math::sub_i128(due, distributed)?);
        distributed = due;
        events::emit_flash_loan(e, collection, id, operator, record.flash_fee);
    }
    value::pay(e, &fee_token, &admin, math::sub_i128(payment, distributed)?);
    Ok(())
}

/// Receivers' cumulative share once `fee` is added to `settled` fees.
///
/// The admin cut is taken on the running total rather than per asset, so after
/// the last asset the admin holds exactly `bps(total_fee)` and no receiver share
/// is negative.
fn receivers_due(settled: i128, fee: i128, rate: u32) -> Result<i128, ContractError> {
    let running = math::add_i128(settled, fee)?;
    math::sub_i128(running, math::bps(running, rate)?)
}
