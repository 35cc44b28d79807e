//! AccountNumber - Validated account identifier
//!
//! Account numbers are non-empty strings. Numbers issued by the bank
//! itself are ten decimal digits, zero-padded; customer-supplied numbers
//! only need to be non-blank.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing account numbers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountNumberError {
    #[error("Account number cannot be empty")]
    Empty,
}

/// Unique identifier of a customer account.
///
/// # Examples
/// ```
/// use teller_core::AccountNumber;
///
/// let number: AccountNumber = "1234567890".parse().unwrap();
/// assert_eq!(number.as_str(), "1234567890");
///
/// // Surrounding whitespace is trimmed, blank input is rejected
/// assert!(AccountNumber::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Width of bank-generated account numbers.
    pub const GENERATED_DIGITS: usize = 10;

    /// Create an account number from raw input.
    ///
    /// Input is trimmed; an empty result is rejected.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountNumberError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Err(AccountNumberError::Empty)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Build a bank-issued account number from a numeric seed,
    /// zero-padded to [`Self::GENERATED_DIGITS`].
    pub fn from_digits(value: u64) -> Self {
        Self(format!("{:0width$}", value, width = Self::GENERATED_DIGITS))
    }

    /// The account number as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = AccountNumberError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

// Lets `BTreeMap<AccountNumber, _>` be queried with plain `&str` keys.
impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}
