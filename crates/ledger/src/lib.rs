//! Teller Ledger - Account registry and authentication core
//!
//! This is the HEART of Teller. All account state changes go through this
//! crate, and every security- or money-relevant outcome is recorded to the
//! audit trail from here.
//!
//! # Key Types
//! - `Account`: Customer aggregate (balance, credentials, lock, history)
//! - `Transaction`: Immutable record of one balance change
//! - `Bank`: In-memory registry plus the audit-writing operation wrappers
//! - `Migration`: Credential upgrade flow for legacy accounts
//! - `AdminSession`: Authorization gate for administrative operations

pub mod account;
pub mod admin;
pub mod bank;
pub mod error;
pub mod migration;
pub mod transaction;

pub use account::Account;
pub use admin::AdminSession;
pub use bank::{Bank, LoginRoute};
pub use error::LedgerError;
pub use migration::{Migration, MigrationCredentials, MigrationState};
pub use transaction::{Transaction, TransactionKind};
