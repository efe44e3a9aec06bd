//! IOU lifecycle tests: apply, cancel, accept, redeem and claim.

use crate::test_helpers::*;
use crate::{ContractError, IouRecord, IouStatus};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

/// One whole token at 7 decimals.
const TOKEN: i128 = 10_000_000;

/// Deposit two assets and propose a 10-token loan with a 1-token fee over one
/// day against the second one.
fn propose(s: &Setup) -> u64 {
    s.deposit(0);
    let id = s.deposit(0);
    s.vault.apply_iou(
        &s.user,
        &s.collection.address,
        &id,
        &s.borrow_token.address,
        &(10 * TOKEN),
        &TOKEN,
        &ONE_DAY,
    );
    id
}

/// `propose`, then `someone` accepts at `now`.
fn activate(s: &Setup, now: u64) -> u64 {
    let id = propose(s);
    set_timestamp(&s.env, now);
    s.approve_borrow(&s.someone, 11 * TOKEN);
    s.vault.accept_iou(&s.someone, &s.collection.address, &id);
    id
}

#[test]
fn test_accept_scenario() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    assert_eq!(id, 2);

    let proposed = s.vault.get_custody(&s.collection.address, &id).unwrap();
    assert_eq!(proposed.iou_status(), IouStatus::Proposed);

    set_timestamp(&e, 1_000);
    s.approve_borrow(&s.someone, 11 * TOKEN);
    let user_before = s.borrow_token.balance(&s.user);
    let someone_before = s.borrow_token.balance(&s.someone);

    let deadline = s.vault.accept_iou(&s.someone, &s.collection.address, &id);

    let admin_fee = 10 * TOKEN * 30 / 10_000;
    assert_eq!(deadline, 1_000 + ONE_DAY);
    assert_eq!(s.borrow_token.balance(&s.user), user_before + 10 * TOKEN);
    assert_eq!(
        s.borrow_token.balance(&s.someone),
        someone_before - 10 * TOKEN - admin_fee
    );
    assert_eq!(s.borrow_token.balance(&s.admin), admin_fee);

    let record = s.vault.get_custody(&s.collection.address, &id).unwrap();
    let iou = record.iou.clone();
    assert_eq!(iou.status, IouStatus::Active);
    assert_eq!(iou.accepter, Some(s.someone.clone()));
    assert_eq!(iou.borrow_deadline, 1_000 + ONE_DAY);
    assert_eq!(record.depositor, s.user);
    assert_eq!(record.flash_fee_receiver, s.someone);

    let late = Address::generate(&e);
    let again = s.vault.try_accept_iou(&late, &s.collection.address, &id);
    assert_eq!(again, Err(Ok(ContractError::InvalidIouStatus)));
}

#[test]
fn test_apply_validations() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.deposit(0);
    let c = s.collection.address.clone();
    let token = s.borrow_token.address.clone();

    let stranger = s
        .vault
        .try_apply_iou(&s.someone, &c, &id, &token, &10, &1, &ONE_DAY);
    assert_eq!(stranger, Err(Ok(ContractError::NotOwner)));

    let unlisted = s
        .vault
        .try_apply_iou(&s.user, &c, &id, &s.fee_token.address, &10, &1, &ONE_DAY);
    assert_eq!(unlisted, Err(Ok(ContractError::TokenNotWhitelisted)));

    let zero_amount = s.vault.try_apply_iou(&s.user, &c, &id, &token, &0, &1, &ONE_DAY);
    assert_eq!(zero_amount, Err(Ok(ContractError::InvalidAmount)));

    let negative_fee = s.vault.try_apply_iou(&s.user, &c, &id, &token, &10, &-1, &ONE_DAY);
    assert_eq!(negative_fee, Err(Ok(ContractError::InvalidAmount)));

    let zero_duration = s.vault.try_apply_iou(&s.user, &c, &id, &token, &10, &1, &0);
    assert_eq!(zero_duration, Err(Ok(ContractError::InvalidDuration)));

    s.vault.apply_iou(&s.user, &c, &id, &token, &10, &0, &ONE_DAY);
    let twice = s.vault.try_apply_iou(&s.user, &c, &id, &token, &20, &2, &ONE_DAY);
    assert_eq!(twice, Err(Ok(ContractError::IouExists)));
}

#[test]
fn test_cancel_then_apply_new_terms() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);

    s.vault.cancel_iou(&s.user, &s.collection.address, &id);
    let record = s.vault.get_custody(&s.collection.address, &id).unwrap();
    assert_eq!(record.iou_status(), IouStatus::None);
    assert_eq!(record.iou, IouRecord::empty());

    s.vault.apply_iou(
        &s.user,
        &s.collection.address,
        &id,
        &s.borrow_token.address,
        &(5 * TOKEN),
        &0,
        &(2 * ONE_DAY),
    );
    let iou = s
        .vault
        .get_custody(&s.collection.address, &id)
        .unwrap()
        .iou;
    assert_eq!(iou.status, IouStatus::Proposed);
    assert_eq!(iou.borrow_token, Some(s.borrow_token.address.clone()));
    assert_eq!(iou.borrow_amount, 5 * TOKEN);
    assert_eq!(iou.borrow_duration, 2 * ONE_DAY);
}

#[test]
fn test_cancel_requires_depositor_and_proposed_status() {
    let e = Env::default();
    let s = setup(&e);
    let plain = s.deposit(0);
    let c = s.collection.address.clone();

    let nothing = s.vault.try_cancel_iou(&s.user, &c, &plain);
    assert_eq!(nothing, Err(Ok(ContractError::InvalidIouStatus)));

    let id = activate(&s, 0);
    let stranger = s.vault.try_cancel_iou(&s.someone, &c, &id);
    assert_eq!(stranger, Err(Ok(ContractError::NotOwner)));

    let active = s.vault.try_cancel_iou(&s.user, &c, &id);
    assert_eq!(active, Err(Ok(ContractError::InvalidIouStatus)));
}

#[test]
fn test_accept_own_iou_is_self_dealing() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    s.approve_borrow(&s.user, 11 * TOKEN);

    let result = s.vault.try_accept_iou(&s.user, &s.collection.address, &id);
    assert_eq!(result, Err(Ok(ContractError::SelfDealingDenied)));
}

#[test]
fn test_accept_without_iou() {
    let e = Env::default();
    let s = setup(&e);
    let plain = s.deposit(0);

    let no_iou = s.vault.try_accept_iou(&s.someone, &s.collection.address, &plain);
    assert_eq!(no_iou, Err(Ok(ContractError::InvalidIouStatus)));

    let no_record = s.vault.try_accept_iou(&s.someone, &s.collection.address, &77);
    assert_eq!(no_record, Err(Ok(ContractError::InvalidIouStatus)));
}

#[test]
fn test_accept_needs_allowance_for_principal_and_fee() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    s.approve_borrow(&s.someone, 10 * TOKEN);
    let user_before = s.borrow_token.balance(&s.user);

    let result = s.vault.try_accept_iou(&s.someone, &s.collection.address, &id);
    assert_eq!(result, Err(Ok(ContractError::InsufficientAllowance)));
    assert_eq!(s.borrow_token.balance(&s.user), user_before);
    assert_eq!(
        s.vault
            .get_custody(&s.collection.address, &id)
            .unwrap()
            .iou_status(),
        IouStatus::Proposed
    );
}

#[test]
fn test_accept_after_token_delisted() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    s.vault
        .remove_token_from_whitelist(&s.admin, &s.borrow_token.address);

    s.approve_borrow(&s.someone, 11 * TOKEN);
    s.vault.accept_iou(&s.someone, &s.collection.address, &id);
    assert_eq!(
        s.vault
            .get_custody(&s.collection.address, &id)
            .unwrap()
            .iou_status(),
        IouStatus::Active
    );
}

#[test]
fn test_redeem_repays_lender_and_releases_collateral() {
    let e = Env::default();
    let s = setup(&e);
    let id = activate(&s, 1_000);
    set_timestamp(&e, 1_000 + ONE_DAY - 1);

    let repayment = 11 * TOKEN;
    let redeem_fee = repayment * 30 / 10_000;
    s.approve_borrow(&s.user, repayment + redeem_fee);
    let someone_before = s.borrow_token.balance(&s.someone);
    let user_before = s.borrow_token.balance(&s.user);
    let admin_before = s.borrow_token.balance(&s.admin);

    s.vault.redeem_nft(&s.user, &s.collection.address, &id);

    assert_eq!(s.borrow_token.balance(&s.someone), someone_before + repayment);
    assert_eq!(
        s.borrow_token.balance(&s.user),
        user_before - repayment - redeem_fee
    );
    assert_eq!(s.borrow_token.balance(&s.admin), admin_before + redeem_fee);

    let record = s.vault.get_custody(&s.collection.address, &id).unwrap();
    assert_eq!(record.iou, IouRecord::empty());
    assert_eq!(record.depositor, s.user);
    assert_eq!(record.flash_fee_receiver, s.user);

    s.vault.withdraw(&s.user, &s.collection.address, &id);
    assert_eq!(s.collection.owner_of(&id), s.user);
}

#[test]
fn test_redeem_at_deadline_is_expired() {
    let e = Env::default();
    let s = setup(&e);
    let id = activate(&s, 1_000);
    s.approve_borrow(&s.user, 12 * TOKEN);
    set_timestamp(&e, 1_000 + ONE_DAY);

    let result = s.vault.try_redeem_nft(&s.user, &s.collection.address, &id);
    assert_eq!(result, Err(Ok(ContractError::LoanExpired)));
}

#[test]
fn test_redeem_requires_active_iou_and_allowance() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    let c = s.collection.address.clone();

    let proposed = s.vault.try_redeem_nft(&s.user, &c, &id);
    assert_eq!(proposed, Err(Ok(ContractError::InvalidIouStatus)));

    s.approve_borrow(&s.someone, 11 * TOKEN);
    s.vault.accept_iou(&s.someone, &c, &id);

    let stranger = s.vault.try_redeem_nft(&s.someone, &c, &id);
    assert_eq!(stranger, Err(Ok(ContractError::NotOwner)));

    s.approve_borrow(&s.user, 11 * TOKEN);
    let short = s.vault.try_redeem_nft(&s.user, &c, &id);
    assert_eq!(short, Err(Ok(ContractError::InsufficientAllowance)));
}

#[test]
fn test_claim_after_deadline_transfers_ownership_of_record() {
    let e = Env::default();
    let s = setup(&e);
    let id = activate(&s, 1_000);
    let c = s.collection.address.clone();

    set_timestamp(&e, 1_000 + ONE_DAY - 1);
    let early = s.vault.try_claim_nft(&s.someone, &c, &id);
    assert_eq!(early, Err(Ok(ContractError::LoanNotExpired)));

    set_timestamp(&e, 1_000 + ONE_DAY);
    let stranger = Address::generate(&e);
    let wrong = s.vault.try_claim_nft(&stranger, &c, &id);
    assert_eq!(wrong, Err(Ok(ContractError::NotOwner)));

    s.vault.claim_nft(&s.someone, &c, &id);

    let record = s.vault.get_custody(&c, &id).unwrap();
    assert_eq!(record.depositor, s.someone);
    assert_eq!(record.flash_fee_receiver, s.someone);
    assert_eq!(record.iou, IouRecord::empty());
    assert_eq!(s.collection.owner_of(&id), s.vault_id);

    let old_owner = s.vault.try_withdraw(&s.user, &c, &id);
    assert_eq!(old_owner, Err(Ok(ContractError::NotOwner)));

    s.vault.withdraw(&s.someone, &c, &id);
    assert_eq!(s.collection.owner_of(&id), s.someone);
}

#[test]
fn test_claim_without_active_iou() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);

    let proposed = s.vault.try_claim_nft(&s.someone, &s.collection.address, &id);
    assert_eq!(proposed, Err(Ok(ContractError::InvalidIouStatus)));

    let missing = s.vault.try_claim_nft(&s.someone, &s.collection.address, &99);
    assert_eq!(missing, Err(Ok(ContractError::InvalidIouStatus)));
}

#[test]
fn test_active_iou_blocks_withdraw_and_reapply() {
    let e = Env::default();
    let s = setup(&e);
    let id = activate(&s, 0);
    let c = s.collection.address.clone();

    let withdraw = s.vault.try_withdraw(&s.user, &c, &id);
    assert_eq!(withdraw, Err(Ok(ContractError::CollateralEncumbered)));

    let reapply = s.vault.try_apply_iou(
        &s.user,
        &c,
        &id,
        &s.borrow_token.address,
        &TOKEN,
        &0,
        &ONE_DAY,
    );
    assert_eq!(reapply, Err(Ok(ContractError::IouExists)));
}

#[test]
fn test_flash_fee_locked_while_iou_attached() {
    let e = Env::default();
    let s = setup(&e);
    let id = propose(&s);
    let c = s.collection.address.clone();

    let proposed = s.vault.try_set_flash_fee(&s.user, &c, &id, &0);
    assert_eq!(proposed, Err(Ok(ContractError::CollateralEncumbered)));

    s.vault.set_flash_fee(&s.user, &c, &(id - 1), &5);
    s.approve_borrow(&s.someone, 11 * TOKEN);
    s.vault.accept_iou(&s.someone, &c, &id);

    let active = s.vault.try_set_flash_fee(&s.user, &c, &id, &0);
    assert_eq!(active, Err(Ok(ContractError::CollateralEncumbered)));
    let record = s.vault.get_custody(&c, &id).unwrap();
    assert_eq!(record.iou_status(), IouStatus::Active);
    assert_eq!(record.flash_fee, 0);

    s.approve_borrow(&s.user, 12 * TOKEN);
    s.vault.redeem_nft(&s.user, &c, &id);
    s.vault.set_flash_fee(&s.user, &c, &id, &250);
    assert_eq!(s.vault.get_custody(&c, &id).unwrap().flash_fee, 250);
}
