#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Custody record errors (codes 200-299).
    Custody,
    /// Flash-loan errors (codes 300-399).
    FlashLoan,
    /// IOU lifecycle errors (codes 400-499).
    Iou,
    /// Reentrancy guard and freeze gate errors (codes 500-599).
    Guard,
    /// Argument validation errors (codes 600-699).
    Validation,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the vault contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Custody
///   300 - 399 : FlashLoan
///   400 - 499 : Iou
///   500 - 599 : Guard
///   600 - 699 : Validation
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    NotAdmin = 100,

    /// Caller is not the depositor (or accepter) the operation requires.
    NotOwner = 101,

    /// The depositor tried to fund their own IOU.
    SelfDealingDenied = 102,

    // --- Custody (200-299) ---
    /// A custody record already exists for this asset.
    AlreadyCustodied = 200,

    /// The asset backs a proposed or active IOU and cannot leave custody.
    CollateralEncumbered = 201,

    /// The asset registry rejected the transfer into custody.
    TransferDenied = 202,

    /// A batch call was made with no asset ids.
    EmptyBatch = 203,

    /// Batch ids and fees have different lengths.
    BatchLengthMismatch = 204,

    // --- FlashLoan (300-399) ---
    /// The asset is not custodied or its flash fee is zero.
    FlashDisabled = 300,

    /// The supplied payment does not cover the summed flash fees.
    InsufficientFee = 301,

    /// An asset was not back in custody when the operator callback returned.
    FlashNotReturned = 302,

    // --- Iou (400-499) ---
    /// An IOU is already proposed or active for this asset.
    IouExists = 400,

    /// The IOU is not in the status this operation requires.
    InvalidIouStatus = 401,

    /// The payer has not approved enough tokens for the vault.
    InsufficientAllowance = 402,

    /// The borrow token is not on the admin whitelist.
    TokenNotWhitelisted = 403,

    /// The borrow deadline has passed; the IOU can no longer be redeemed.
    LoanExpired = 404,

    /// The borrow deadline has not been reached; the collateral cannot be claimed.
    LoanNotExpired = 405,

    // --- Guard (500-599) ---
    /// A mutating call was made while another one is still in progress.
    ReentrantCall = 500,

    /// The system is frozen by the admin.
    SystemFrozen = 501,

    // --- Validation (600-699) ---
    /// Amount argument is out of range.
    InvalidAmount = 600,

    /// Duration argument must be strictly positive.
    InvalidDuration = 601,

    /// Fee rate must be in the range 0-10000 basis points.
    InvalidFeeRate = 602,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category(), description() and is_retryable() on every ContractError.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return true when resubmitting with corrected funds, approvals or timing can succeed.
    fn is_retryable(&self) -> bool;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            ContractError::NotAdmin
            | ContractError::NotOwner
            | ContractError::SelfDealingDenied => ErrorCategory::Authorization,

            ContractError::AlreadyCustodied
            | ContractError::CollateralEncumbered
            | ContractError::TransferDenied
            | ContractError::EmptyBatch
            | ContractError::BatchLengthMismatch => ErrorCategory::Custody,

            ContractError::FlashDisabled
            | ContractError::InsufficientFee
            | ContractError::FlashNotReturned => ErrorCategory::FlashLoan,

            ContractError::IouExists
            | ContractError::InvalidIouStatus
            | ContractError::InsufficientAllowance
            | ContractError::TokenNotWhitelisted
            | ContractError::LoanExpired
            | ContractError::LoanNotExpired => ErrorCategory::Iou,

            ContractError::ReentrantCall | ContractError::SystemFrozen => ErrorCategory::Guard,

            ContractError::InvalidAmount
            | ContractError::InvalidDuration
            | ContractError::InvalidFeeRate => ErrorCategory::Validation,

            ContractError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::NotAdmin => "Caller is not the admin",
            ContractError::NotOwner => "Caller is not the owner of this custody record",
            ContractError::SelfDealingDenied => "Accepter and depositor are the same",
            ContractError::AlreadyCustodied => "Asset has already been deposited",
            ContractError::CollateralEncumbered => "Asset is pledged to an IOU",
            ContractError::TransferDenied => "Asset registry rejected the transfer",
            ContractError::EmptyBatch => "Batch contains no assets",
            ContractError::BatchLengthMismatch => "Batch ids and fees differ in length",
            ContractError::FlashDisabled => "Flash loan is disabled for this asset",
            ContractError::InsufficientFee => "Payment does not cover the flash-loan fee",
            ContractError::FlashNotReturned => "Flash-loaned asset was not returned",
            ContractError::IouExists => "An IOU already exists for this asset",
            ContractError::InvalidIouStatus => "IOU is not in the required status",
            ContractError::InsufficientAllowance => "Token allowance is insufficient",
            ContractError::TokenNotWhitelisted => "Borrow token is not whitelisted",
            ContractError::LoanExpired => "IOU deadline has passed",
            ContractError::LoanNotExpired => "IOU deadline has not been reached",
            ContractError::ReentrantCall => "Reentrant call rejected",
            ContractError::SystemFrozen => "System is frozen",
            ContractError::InvalidAmount => "Amount is out of range",
            ContractError::InvalidDuration => "Duration must be strictly positive",
            ContractError::InvalidFeeRate => "Fee rate must be in range 0-10000 bps",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContractError::InsufficientFee
                | ContractError::InsufficientAllowance
                | ContractError::TransferDenied
                | ContractError::ReentrantCall
                | ContractError::SystemFrozen
        )
    }
}
