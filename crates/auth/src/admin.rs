//! Administrator credential
//!
//! There is exactly one administrator with a fixed, process-wide credential.
//! The digest is computed once on first use and reused for every check.

use crate::password::{hash_password, verify_password, PasswordHash};
use lazy_static::lazy_static;

/// Subject name used for admin entries in the audit log.
pub const ADMIN_USER: &str = "ADMIN";

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

lazy_static! {
    static ref ADMIN_PASSWORD_HASH: PasswordHash = hash_password(DEFAULT_ADMIN_PASSWORD);
}

/// Check a password against the fixed administrator credential.
pub fn authenticate_admin(password: &str) -> bool {
    verify_password(password, Some(&ADMIN_PASSWORD_HASH))
}

/// Hint shown by the CLI at the admin login prompt.
pub fn admin_password_hint() -> String {
    format!("(Default password: {})", DEFAULT_ADMIN_PASSWORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password_accepted() {
        assert!(authenticate_admin("admin123"));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!authenticate_admin("admin1234"));
        assert!(!authenticate_admin(""));
        assert!(!authenticate_admin("ADMIN123"));
    }

    #[test]
    fn test_hint_names_default_password() {
        assert!(admin_password_hint().contains("admin123"));
    }
}
