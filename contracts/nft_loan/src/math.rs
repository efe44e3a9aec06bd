//! Overflow-safe arithmetic helpers for fee calculations.
//!
//! Every helper returns `ContractError::Overflow` instead of wrapping.

use nft_loan_errors::ContractError;

/// Basis-point denominator (100 % = 10 000 bps).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Overflow)
}

/// Checked `u64` addition, used for deadlines.
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Calculate a basis-point share of an amount: `amount * bps / 10_000`, rounded down.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, ContractError> {
    amount
        .checked_mul(bps as i128)
        .ok_or(ContractError::Overflow)
        .map(|numerator| numerator / BPS_DENOMINATOR)
}
