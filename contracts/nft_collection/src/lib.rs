//! NFT Collection Contract
//!
//! A deliberately small non-fungible registry: sequential ids, single-token
//! approvals, operator approvals and owner-checked transfers. The NFT loan
//! vault consumes it through the `owner_of` / `transfer` / `transfer_from`
//! boundary only.
//!
//! Ids start at 1. Minting is restricted to the collection admin.

#![no_std]

mod errors;

use errors::*;

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};


#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    /// Last minted id.
    LastId,
    Owner(u64),
    Approved(u64),
    Balance(Address),
    /// (owner, operator) -> approved for every token of owner.
    Operator(Address, Address),
}

fn bump(e: &Env, key: &DataKey) {
    let ttl = e.storage().max_ttl();
    e.storage().persistent().extend_ttl(key, ttl, ttl);
}

fn read_owner(e: &Env, id: u64) -> Address {
    e.storage()
        .persistent()
        .get(&DataKey::Owner(id))
        .unwrap_or_else(|| panic!("{}", ERR_NO_TOKEN))
}

fn read_balance(e: &Env, owner: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

fn write_balance(e: &Env, owner: &Address, balance: u32) {
    let key = DataKey::Balance(owner.clone());
    e.storage().persistent().set(&key, &balance);
    bump(e, &key);
}

fn operator_approved(e: &Env, owner: &Address, operator: &Address) -> bool {
    e.storage()
        .persistent()
        .get(&DataKey::Operator(owner.clone(), operator.clone()))
        .unwrap_or(false)
}

/// Move `id` from `from` to `to`. Caller has already checked authorization.
fn move_token(e: &Env, from: &Address, to: &Address, id: u64) {
    if read_owner(e, id) != *from {
        panic!("{}", ERR_NOT_TOKEN_OWNER);
    }
    e.storage().persistent().remove(&DataKey::Approved(id));

    let owner_key = DataKey::Owner(id);
    e.storage().persistent().set(&owner_key, to);
    bump(e, &owner_key);

    write_balance(e, from, read_balance(e, from).saturating_sub(1));
    write_balance(e, to, read_balance(e, to).saturating_add(1));

    e.events()
        .publish((Symbol::new(e, "transfer"), from.clone(), to.clone()), id);
}

#[contract]
pub struct NftCollection;

#[contractimpl]
impl NftCollection {
    /// One-time initialization. Panics if called again.
    pub fn initialize(e: Env, admin: Address) {
        if e.storage().instance().has(&DataKey::Admin) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::LastId, &0_u64);
    }

    /// Mint the next id to `to`. Admin only.
    pub fn mint(e: Env, to: Address) -> u64 {
        let admin: Address = e
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        admin.require_auth();

        let last: u64 = e.storage().instance().get(&DataKey::LastId).unwrap_or(0);
        let id = last
            .checked_add(1)
            .unwrap_or_else(|| panic!("{}", ERR_ID_OVERFLOW));
        e.storage().instance().set(&DataKey::LastId, &id);

        let owner_key = DataKey::Owner(id);
        e.storage().persistent().set(&owner_key, &to);
        bump(&e, &owner_key);
        write_balance(&e, &to, read_balance(&e, &to).saturating_add(1));

        e.events().publish((Symbol::new(&e, "mint"), to), id);
        id
    }

    pub fn owner_of(e: Env, id: u64) -> Address {
        read_owner(&e, id)
    }

    pub fn balance_of(e: Env, owner: Address) -> u32 {
        read_balance(&e, &owner)
    }

    pub fn get_approved(e: Env, id: u64) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Approved(id))
    }

    pub fn is_approved_for_all(e: Env, owner: Address, operator: Address) -> bool {
        operator_approved(&e, &owner, &operator)
    }

    /// Approve `operator` to move a single token. Replaces any previous approval.
    pub fn approve(e: Env, owner: Address, operator: Address, id: u64) {
        owner.require_auth();
        if read_owner(&e, id) != owner {
            panic!("{}", ERR_NOT_TOKEN_OWNER);
        }
        let key = DataKey::Approved(id);
        e.storage().persistent().set(&key, &operator);
        bump(&e, &key);
        e.events()
            .publish((Symbol::new(&e, "approve"), owner, operator), id);
    }

    pub fn set_approval_for_all(e: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        let key = DataKey::Operator(owner.clone(), operator.clone());
        if approved {
            e.storage().persistent().set(&key, &true);
            bump(&e, &key);
        } else {
            e.storage().persistent().remove(&key);
        }
        e.events().publish(
            (Symbol::new(&e, "approval_for_all"), owner, operator),
            approved,
        );
    }

    /// Owner-initiated transfer.
    pub fn transfer(e: Env, from: Address, to: Address, id: u64) {
        from.require_auth();
        move_token(&e, &from, &to, id);
    }

    /// Transfer by an approved spender (or the owner acting as spender).
    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, id: u64) {
        spender.require_auth();
        let owner = read_owner(&e, id);
        let approved: Option<Address> = e.storage().persistent().get(&DataKey::Approved(id));
        let allowed = spender == owner
            || approved.as_ref() == Some(&spender)
            || operator_approved(&e, &owner, &spender);
        if !allowed {
            panic!("{}", ERR_NOT_OWNER_NOR_APPROVED);
        }
        move_token(&e, &from, &to, id);
    }
}
