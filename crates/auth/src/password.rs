//! Password digests
//!
//! Passwords are never stored in plaintext; accounts hold a SHA256 digest
//! of the password, hex encoded. The digest is deterministic (no salt) so
//! identical input yields identical output across runs and machines.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque hex-encoded password digest as stored on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The digest as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Data files carry the digest as a plain string; any non-empty string is
// accepted as an opaque digest (empty strings are folded to "no credential"
// at the account layer, not here).
impl From<String> for PasswordHash {
    fn from(digest: String) -> Self {
        Self(digest)
    }
}

/// Calculate the SHA256 digest of a password.
///
/// Cannot fail: the algorithm is compiled in, so a missing-digest-algorithm
/// condition does not exist at call sites.
pub fn hash_password(password: &str) -> PasswordHash {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    PasswordHash(hex::encode(hasher.finalize()))
}

/// Verify a password against a stored digest.
///
/// An absent stored digest never verifies.
pub fn verify_password(password: &str, stored: Option<&PasswordHash>) -> bool {
    match stored {
        Some(digest) => hash_password(password) == *digest,
        None => false,
    }
}
