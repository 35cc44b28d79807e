//! Teller Auth - Credential logic
//!
//! Stateless verification primitives shared by the ledger and the CLI:
//! - `PasswordHash` + `hash_password`/`verify_password`: SHA256 digests
//! - `Pin` + `is_valid_pin`/`verify_pin`: 4-digit PIN rules
//! - `authenticate_admin`: the single fixed administrator credential
//!
//! Nothing in this crate touches accounts or files; it only answers
//! yes/no credential questions for the layers that do.

pub mod admin;
pub mod password;
pub mod pin;

pub use admin::{admin_password_hint, authenticate_admin, ADMIN_USER};
pub use password::{hash_password, verify_password, PasswordHash};
pub use pin::{is_valid_pin, verify_pin, Pin, PinError};
