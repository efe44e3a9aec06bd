use soroban_sdk::{contracttype, Address};

// ─── IOU state ─────────────────────────────────────────────────────────────

/// Lifecycle status of the IOU attached to a custodied asset.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IouStatus {
    /// No loan proposed; the asset is free to withdraw.
    None,
    /// Depositor has published loan terms; waiting for a lender.
    Proposed,
    /// A lender funded the loan; the asset is collateral until redeem or claim.
    Active,
}

/// Collateralized loan terms embedded in a custody record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IouRecord {
    pub status: IouStatus,
    /// Token the principal is paid in (must be whitelisted at proposal time).
    pub borrow_token: Option<Address>,
    /// Principal paid by the accepter to the depositor.
    pub borrow_amount: i128,
    /// Interest the depositor owes on redemption, on top of the principal.
    pub borrow_fee: i128,
    /// Loan length in seconds, counted from acceptance.
    pub borrow_duration: u64,
    /// Lender; set once the IOU is accepted.
    pub accepter: Option<Address>,
    /// `accepted_at + borrow_duration`; 0 while proposed.
    pub borrow_deadline: u64,
}

impl IouRecord {
    /// The `None` form: no loan, every term zeroed.
    pub fn empty() -> Self {
        IouRecord {
            status: IouStatus::None,
            borrow_token: None,
            borrow_amount: 0,
            borrow_fee: 0,
            borrow_duration: 0,
            accepter: None,
            borrow_deadline: 0,
        }
    }
}

// ─── Custody state ─────────────────────────────────────────────────────────

/// One custodied NFT.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustodyRecord {
    /// Owner of record: may withdraw, set the flash fee and apply for an IOU.
    pub depositor: Address,
    /// Fee-token amount charged per flash loan. 0 disables flash loans.
    pub flash_fee: i128,
    /// Receives the non-admin share of flash fees.
    pub flash_fee_receiver: Address,
    /// Loan attached to the asset; `IouStatus::None` when there is none.
    pub iou: IouRecord,
}

impl CustodyRecord {
    pub fn iou_status(&self) -> IouStatus {
        self.iou.status
    }
}

// ─── Fee configuration ─────────────────────────────────────────────────────

/// Admin fee rates in basis points (100 bps = 1 %).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeRates {
    /// Charged to the accepter on `accept_iou`, on top of the principal.
    pub trade_bps: u32,
    /// Cut of every flash fee.
    pub flash_loan_bps: u32,
    /// Charged to the depositor on `redeem_nft`, on top of the repayment.
    pub redeem_bps: u32,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Token flash fees are paid in.
    FeeToken,
    /// Admin fee rates (FeeRates).
    FeeRates,
    /// Freeze switch for deposits and flash loans.
    Frozen,
    /// Reentrancy lock.
    Lock,
    /// Borrow token whitelist entry.
    Whitelist(Address),
    /// Custody record per (collection, id).
    Custody(Address, u64),
}
