//! External contract interfaces: the NFT collection that actually owns the
//! assets, and the flash-loan operator callback.

use nft_loan_errors::ContractError;
use soroban_sdk::{contractclient, Address, Bytes, Env, Vec};

/// Subset of an NFT collection the vault relies on. Transfers are all-or-nothing:
/// a rejected transfer fails the call without side effects.
#[allow(dead_code)]
#[contractclient(name = "NftClient")]
pub trait NftInterface {
    fn owner_of(env: Env, id: u64) -> Address;
    fn transfer(env: Env, from: Address, to: Address, id: u64);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, id: u64);
    fn approve(env: Env, owner: Address, operator: Address, id: u64);
    fn get_approved(env: Env, id: u64) -> Option<Address>;
}

/// Callback invoked on the operator once per flash loan, while it holds every
/// borrowed asset. It must hand each asset back to the vault before returning.
#[allow(dead_code)]
#[contractclient(name = "FlashLoanReceiverClient")]
pub trait FlashLoanReceiver {
    fn on_flash_loan(env: Env, collection: Address, ids: Vec<u64>, initiator: Address, data: Bytes);
}

/// Pull `id` from `owner` into the vault. The owner must have approved the vault
/// on the collection beforehand.
pub fn pull_into_custody(
    e: &Env,
    collection: &Address,
    owner: &Address,
    id: u64,
) -> Result<(), ContractError> {
    let vault = e.current_contract_address();
    match NftClient::new(e, collection).try_transfer_from(&vault, owner, &vault, &id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferDenied),
    }
}

/// Send a custodied asset out of the vault.
pub fn send_from_custody(e: &Env, collection: &Address, to: &Address, id: u64) {
    let vault = e.current_contract_address();
    NftClient::new(e, collection).transfer(&vault, to, &id);
}

pub fn is_held_by_vault(e: &Env, collection: &Address, id: u64) -> bool {
    NftClient::new(e, collection).owner_of(&id) == e.current_contract_address()
}

pub fn notify_operator(
    e: &Env,
    operator: &Address,
    collection: &Address,
    ids: &Vec<u64>,
    initiator: &Address,
    data: &Bytes,
) {
    FlashLoanReceiverClient::new(e, operator).on_flash_loan(collection, ids, initiator, data);
}
