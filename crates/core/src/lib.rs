//! Teller Core - Domain types
//!
//! This crate contains the fundamental types used across Teller:
//! - `Amount`: Non-negative decimal wrapper for money
//! - `AccountNumber`: Validated account identifier

pub mod account_number;
pub mod amount;

pub use account_number::{AccountNumber, AccountNumberError};
pub use amount::{Amount, AmountError};
