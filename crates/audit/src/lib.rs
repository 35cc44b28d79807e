//! Teller Audit - Append-only security event trail
//!
//! Security- and money-relevant actions append one formatted line each to
//! `audit.log`. The file is the historical record; it is never rewritten,
//! and the read side returns raw lines for display.

pub mod error;
pub mod event;
pub mod log;

pub use error::AuditError;
pub use event::{AuditAction, AuditEvent, AuditStatus, Subject};
pub use log::{AuditLog, AuditTail};
