//! NFT Loan Vault
//!
//! Holds NFTs in custody on behalf of their depositors and puts them to work:
//!
//! - **Flash loans**: any caller may borrow one or more custodied NFTs for the
//!   duration of a single operator callback, paying each asset's flash fee.
//! - **IOUs**: a depositor may offer an NFT as collateral for a fixed-term
//!   loan in a whitelisted token. The lender is repaid on redemption, or takes
//!   over the NFT once the deadline passes.
//!
//! ## Key design decisions
//!
//! - **Typed errors**: every entry point returns `Result<_, ContractError>`; a
//!   failed call is rolled back by the host, which makes batches and flash
//!   loans all-or-nothing.
//! - **Single lock**: every mutating entry point runs under one reentrancy
//!   guard and fails with `ReentrantCall` if it is already held.
//! - **Freeze gate**: the admin can stop deposits and flash loans. Withdrawals
//!   and IOU settlement stay open.

#![no_std]

mod config;
mod custody;
mod events;
mod flash;
mod freeze;
mod guard;
mod iou;
mod math;
mod nft;
mod types;
mod value;

pub use nft::{FlashLoanReceiver, FlashLoanReceiverClient, NftClient, NftInterface};
pub use nft_loan_errors::ContractError;
pub use types::{CustodyRecord, FeeRates, IouRecord, IouStatus};

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Vec};







#[cfg(test)]
mod test_iou;

/// Entry check shared by every mutating call: the vault must be initialized and
/// the lock must be free. Authorization is checked inside `f` so that it is
/// covered by the lock.
fn guarded<T, F>(e: &Env, f: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    config::require_initialized(e)?;
    guard::with_reentrancy_guard(e, f)
}

#[contract]
pub struct NftLoan;

#[contractimpl]
impl NftLoan {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization. `fee_token` is the token flash fees are paid in.
    /// All admin fee rates start at 30 bps.
    pub fn initialize(e: Env, admin: Address, fee_token: Address) -> Result<(), ContractError> {
        admin.require_auth();
        config::initialize(&e, &admin, &fee_token)
    }

    pub fn set_admin_trade_fee_bps(e: Env, admin: Address, bps: u32) -> Result<FeeRates, ContractError> {
        guarded(&e, || {
            config::set_fee_rate(&e, &admin, "trade", bps, |rates, bps| rates.trade_bps = bps)
        })
    }

    pub fn set_admin_flash_loan_fee_bps(
        e: Env,
        admin: Address,
        bps: u32,
    ) -> Result<FeeRates, ContractError> {
        guarded(&e, || {
            config::set_fee_rate(&e, &admin, "flash_loan", bps, |rates, bps| {
                rates.flash_loan_bps = bps
            })
        })
    }

    pub fn set_admin_redeem_fee_bps(e: Env, admin: Address, bps: u32) -> Result<FeeRates, ContractError> {
        guarded(&e, || {
            config::set_fee_rate(&e, &admin, "redeem", bps, |rates, bps| rates.redeem_bps = bps)
        })
    }

    /// Allow `token` as the borrow token of new IOUs.
    pub fn add_token_to_whitelist(e: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        guarded(&e, || config::set_whitelisted(&e, &admin, &token, true))
    }

    /// Existing IOUs in `token` are unaffected.
    pub fn remove_token_from_whitelist(
        e: Env,
        admin: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        guarded(&e, || config::set_whitelisted(&e, &admin, &token, false))
    }

    /// Stop deposits and flash loans.
    pub fn set_freezing(e: Env, admin: Address) -> Result<(), ContractError> {
        guarded(&e, || {
            config::require_admin(&e, &admin)?;
            freeze::set_frozen(&e, &admin, true);
            Ok(())
        })
    }

    pub fn un_freezing(e: Env, admin: Address) -> Result<(), ContractError> {
        guarded(&e, || {
            config::require_admin(&e, &admin)?;
            freeze::set_frozen(&e, &admin, false);
            Ok(())
        })
    }

    pub fn transfer_admin(e: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        guarded(&e, || config::transfer_admin(&e, &admin, &new_admin))
    }

    // ── Custody ────────────────────────────────────────────────────────────

    /// Move `id` from `caller` into custody. The caller must have approved the
    /// vault on `collection` first. `fee` is the flash fee in the fee token;
    /// zero disables flash loans for the asset.
    pub fn deposit(
        e: Env,
        caller: Address,
        collection: Address,
        id: u64,
        fee: i128,
    ) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            custody::deposit(&e, &caller, &collection, id, fee)
        })
    }

    /// Deposit several assets of one collection; `fees[i]` applies to `ids[i]`.
    /// Returns the number deposited.
    pub fn deposit_batch(
        e: Env,
        caller: Address,
        collection: Address,
        ids: Vec<u64>,
        fees: Vec<i128>,
    ) -> Result<u32, ContractError> {
        guarded(&e, || {
            caller.require_auth();
            custody::deposit_batch(&e, &caller, &collection, &ids, &fees)
        })
    }

    /// Return an unencumbered asset to its depositor. Available while frozen.
    pub fn withdraw(e: Env, caller: Address, collection: Address, id: u64) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            custody::withdraw(&e, &caller, &collection, id)
        })
    }

    pub fn withdraw_batch(
        e: Env,
        caller: Address,
        collection: Address,
        ids: Vec<u64>,
    ) -> Result<u32, ContractError> {
        guarded(&e, || {
            caller.require_auth();
            custody::withdraw_batch(&e, &caller, &collection, &ids)
        })
    }

    pub fn set_flash_fee(
        e: Env,
        caller: Address,
        collection: Address,
        id: u64,
        fee: i128,
    ) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            custody::set_flash_fee(&e, &caller, &collection, id, fee)
        })
    }

    // ── Flash loans ────────────────────────────────────────────────────────

    /// Lend `ids` to `operator` for one `on_flash_loan` callback.
    ///
    /// `payment` is pulled from `initiator` in the fee token and must cover the
    /// summed flash fees; any excess goes to the admin. Every asset must be
    /// back in the vault when the callback returns.
    pub fn flash_loan(
        e: Env,
        initiator: Address,
        collection: Address,
        ids: Vec<u64>,
        operator: Address,
        payment: i128,
        data: Bytes,
    ) -> Result<(), ContractError> {
        guarded(&e, || {
            initiator.require_auth();
            flash::flash_loan(&e, &initiator, &collection, &ids, &operator, payment, &data)
        })
    }

    // ── IOUs ───────────────────────────────────────────────────────────────

    /// Offer a custodied asset as collateral for `amount` of `token`, repaid as
    /// `amount + fee` within `duration` seconds of acceptance.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_iou(
        e: Env,
        caller: Address,
        collection: Address,
        id: u64,
        token: Address,
        amount: i128,
        fee: i128,
        duration: u64,
    ) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            iou::apply(&e, &caller, &collection, id, &token, amount, fee, duration)
        })
    }

    pub fn cancel_iou(e: Env, caller: Address, collection: Address, id: u64) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            iou::cancel(&e, &caller, &collection, id)
        })
    }

    /// Fund a proposed IOU. Returns the borrow deadline.
    pub fn accept_iou(e: Env, caller: Address, collection: Address, id: u64) -> Result<u64, ContractError> {
        guarded(&e, || {
            caller.require_auth();
            iou::accept(&e, &caller, &collection, id)
        })
    }

    pub fn redeem_nft(e: Env, caller: Address, collection: Address, id: u64) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            iou::redeem(&e, &caller, &collection, id)
        })
    }

    pub fn claim_nft(e: Env, caller: Address, collection: Address, id: u64) -> Result<(), ContractError> {
        guarded(&e, || {
            caller.require_auth();
            iou::claim(&e, &caller, &collection, id)
        })
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn get_custody(e: Env, collection: Address, id: u64) -> Option<CustodyRecord> {
        custody::read(&e, &collection, id)
    }

    pub fn is_custodied(e: Env, collection: Address, id: u64) -> bool {
        custody::read(&e, &collection, id).is_some()
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        config::admin(&e)
    }

    pub fn get_fee_token(e: Env) -> Result<Address, ContractError> {
        config::fee_token(&e)
    }

    pub fn get_fee_rates(e: Env) -> Result<FeeRates, ContractError> {
        config::fee_rates(&e)
    }

    pub fn is_whitelisted(e: Env, token: Address) -> bool {
        config::is_whitelisted(&e, &token)
    }

    pub fn is_frozen(e: Env) -> bool {
        freeze::is_frozen(&e)
    }

    pub fn is_locked(e: Env) -> bool {
        guard::is_locked(&e)
    }
}
