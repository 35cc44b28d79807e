//! PIN validation
//!
//! A PIN is exactly four decimal digits. Unlike passwords, PINs are stored
//! as-is and checked by plain equality (this is a simulator, not a vault).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing PINs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must be exactly 4 digits")]
    InvalidFormat,
}

/// A validated 4-digit PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    /// Create a PIN, enforcing the 4-digit format.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PinError> {
        let raw = raw.as_ref();
        if is_valid_pin(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(PinError::InvalidFormat)
        }
    }

    /// The PIN as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

/// True iff `pin` is exactly four ASCII decimal digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

/// Verify a supplied PIN against the stored one.
///
/// An absent stored PIN never verifies.
pub fn verify_pin(supplied: &str, stored: Option<&Pin>) -> bool {
    match stored {
        Some(pin) => pin.as_str() == supplied,
        None => false,
    }
}
