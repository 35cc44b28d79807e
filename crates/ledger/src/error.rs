//! Ledger errors

use rust_decimal::Decimal;
use teller_auth::PinError;
use teller_core::AccountNumberError;
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero: {0}")]
    InvalidAmount(Decimal),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account is locked: {0}")]
    AccountLocked(String),

    #[error("Account number already exists: {0}")]
    DuplicateAccountNumber(String),

    #[error(transparent)]
    InvalidPinFormat(#[from] PinError),

    #[error(transparent)]
    InvalidAccountNumber(#[from] AccountNumberError),

    #[error("Invalid password")]
    PasswordMismatch,

    #[error("Migration cancelled: {reason}")]
    MigrationCancelled { reason: &'static str },

    #[error("Account already has credentials: {0}")]
    MigrationNotRequired(String),

    #[error("Balance overflow")]
    BalanceOverflow,

    #[error("Ledger out of balance for account {account}: recorded {recorded}, derived {derived}")]
    BalanceMismatch {
        account: String,
        recorded: Decimal,
        derived: Decimal,
    },
}
