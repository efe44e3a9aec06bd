use soroban_sdk::{Address, Env, Symbol};

/// Emitted once when the vault is configured.
///
/// # Topics
/// * `Symbol` - "initialized"
///
/// # Data
/// * `Address` - The admin
/// * `Address` - The flash fee token
pub fn emit_initialized(e: &Env, admin: &Address, fee_token: &Address) {
    let topics = (Symbol::new(e, "initialized"),);
    e.events().publish(topics, (admin.clone(), fee_token.clone()));
}

/// Emitted when an NFT enters custody.
///
/// # Topics
/// * `Symbol` - "deposited"
/// * `Address` - The collection
/// * `u64` - The token id
///
/// # Data
/// * `Address` - The depositor
/// * `i128` - The flash fee set at deposit
pub fn emit_deposited(e: &Env, collection: &Address, id: u64, depositor: &Address, fee: i128) {
    let topics = (Symbol::new(e, "deposited"), collection.clone(), id);
    e.events().publish(topics, (depositor.clone(), fee));
}

/// Emitted when an NFT leaves custody back to its depositor.
///
/// # Topics
/// * `Symbol` - "withdrawn"
/// * `Address` - The collection
/// * `u64` - The token id
///
/// # Data
/// * `Address` - The depositor the asset was returned to
pub fn emit_withdrawn(e: &Env, collection: &Address, id: u64, depositor: &Address) {
    let topics = (Symbol::new(e, "withdrawn"), collection.clone(), id);
    e.events().publish(topics, depositor.clone());
}

pub fn emit_flash_fee_set(e: &Env, collection: &Address, id: u64, fee: i128) {
    let topics = (Symbol::new(e, "flash_fee_set"), collection.clone(), id);
    e.events().publish(topics, fee);
}

/// Emitted per asset after a flash loan settles.
///
/// # Data
/// * `Address` - The operator that held the asset
/// * `i128` - The flash fee charged for this asset
pub fn emit_flash_loan(e: &Env, collection: &Address, id: u64, operator: &Address, fee: i128) {
    let topics = (Symbol::new(e, "flash_loan"), collection.clone(), id);
    e.events().publish(topics, (operator.clone(), fee));
}

/// Emitted when a depositor publishes loan terms.
///
/// # Data
/// * `Address` - The borrow token
/// * `i128` - Principal
/// * `i128` - Borrow fee owed on redemption
/// * `u64` - Duration in seconds
pub fn emit_iou_applied(
    e: &Env,
    collection: &Address,
    id: u64,
    token: &Address,
    amount: i128,
    fee: i128,
    duration: u64,
) {
    let topics = (Symbol::new(e, "iou_applied"), collection.clone(), id);
    e.events()
        .publish(topics, (token.clone(), amount, fee, duration));
}

pub fn emit_iou_cancelled(e: &Env, collection: &Address, id: u64) {
    let topics = (Symbol::new(e, "iou_cancelled"), collection.clone(), id);
    e.events().publish(topics, ());
}

/// Emitted when a lender funds a proposed IOU.
///
/// # Data
/// * `Address` - The accepter
/// * `u64` - Borrow deadline (ledger timestamp)
pub fn emit_iou_accepted(e: &Env, collection: &Address, id: u64, accepter: &Address, deadline: u64) {
    let topics = (Symbol::new(e, "iou_accepted"), collection.clone(), id);
    e.events().publish(topics, (accepter.clone(), deadline));
}

/// # Data
/// * `Address` - The accepter that was repaid
/// * `i128` - Repayment (principal plus borrow fee)
pub fn emit_iou_redeemed(e: &Env, collection: &Address, id: u64, accepter: &Address, repaid: i128) {
    let topics = (Symbol::new(e, "iou_redeemed"), collection.clone(), id);
    e.events().publish(topics, (accepter.clone(), repaid));
}

/// # Data
/// * `Address` - The accepter, now the depositor of record
pub fn emit_iou_claimed(e: &Env, collection: &Address, id: u64, accepter: &Address) {
    let topics = (Symbol::new(e, "iou_claimed"), collection.clone(), id);
    e.events().publish(topics, accepter.clone());
}

/// "frozen" or "unfrozen", with the admin as data.
pub fn emit_freeze_changed(e: &Env, admin: &Address, frozen: bool) {
    let name = if frozen { "frozen" } else { "unfrozen" };
    e.events().publish((Symbol::new(e, name),), admin.clone());
}

/// # Topics
/// * `Symbol` - "fee_rate_set"
/// * `Symbol` - Which rate: "trade", "flash_loan" or "redeem"
///
/// # Data
/// * `u32` - New rate in basis points
pub fn emit_fee_rate_set(e: &Env, kind: &Symbol, bps: u32) {
    let topics = (Symbol::new(e, "fee_rate_set"), kind.clone());
    e.events().publish(topics, bps);
}

pub fn emit_whitelist_changed(e: &Env, token: &Address, listed: bool) {
    let name = if listed {
        "whitelist_added"
    } else {
        "whitelist_removed"
    };
    e.events().publish((Symbol::new(e, name),), token.clone());
}

pub fn emit_admin_transferred(e: &Env, old_admin: &Address, new_admin: &Address) {
    let topics = (Symbol::new(e, "admin_transferred"),);
    e.events()
        .publish(topics, (old_admin.clone(), new_admin.clone()));
}
