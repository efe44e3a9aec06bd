//! Fungible-token helpers for flash fees, loan principal and admin fees.
//! Centralizes allowance checks and transfers so zero amounts are skipped
//! consistently.

use nft_loan_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

/// @notice Checks `owner` has approved the vault to spend at least `amount` of `token`.
pub fn require_allowance(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let vault = e.current_contract_address();
    let allowance = TokenClient::new(e, token).allowance(owner, &vault);
    if allowance < amount {
        return Err(ContractError::InsufficientAllowance);
    }
    Ok(())
}

/// @notice Moves `amount` from `from` to `to` using the vault's allowance.
/// @dev Callers run `require_allowance` first so a short approval surfaces as a typed error.
pub fn transfer_with_allowance(e: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let vault = e.current_contract_address();
    TokenClient::new(e, token).transfer_from(&vault, from, to, &amount);
}

/// @notice Pulls `amount` from `payer` into the vault. `payer` must have authorized the call.
pub fn collect(e: &Env, token: &Address, payer: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let vault = e.current_contract_address();
    TokenClient::new(e, token).transfer(payer, &vault, &amount);
}

/// @notice Pays `amount` held by the vault to `recipient`.
pub fn pay(e: &Env, token: &Address, recipient: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let vault = e.current_contract_address();
    TokenClient::new(e, token).transfer(&vault, recipient, &amount);
}
