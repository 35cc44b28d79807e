//! Audit events and their line format
//!
//! Every security- or money-relevant action becomes one line:
//!
//! ```text
//! [2024-03-01 14:02:11] ACTION=WITHDRAW account=1002003004 status=SUCCESS details=Amount=$30.00
//! ```
//!
//! Lines are written once and never rewritten; the log is the historical
//! record, not a queryable database, so the read side stays line-oriented.

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use strum_macros::Display;

/// Timestamp format used in the bracketed line prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Action tag of an audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    WrongPassword,
    WrongPin,
    Deposit,
    Withdraw,
    AccountLock,
    AccountUnlock,
    AccountMigration,
    AdminLogin,
    AdminLogout,
}

/// Outcome recorded on an audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
    Failed,
}

/// Who the event is about. Admin login failures carry no subject
/// (there is no authenticated identity to attribute them to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Account(String),
    Admin(String),
}

/// One audit event, composed by the ledger layer and rendered to a line here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub subject: Option<Subject>,
    pub status: AuditStatus,
    pub details: Option<String>,
}

impl AuditEvent {
    pub fn login_success(account: impl Into<String>) -> Self {
        Self {
            action: AuditAction::Login,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: None,
        }
    }

    pub fn login_failure(account: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            action: AuditAction::Login,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Failed,
            details: Some(reason.into()),
        }
    }

    pub fn wrong_password(account: impl Into<String>) -> Self {
        Self {
            action: AuditAction::WrongPassword,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Failed,
            details: Some("Invalid password attempt".to_string()),
        }
    }

    pub fn wrong_pin(account: impl Into<String>) -> Self {
        Self {
            action: AuditAction::WrongPin,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Failed,
            details: Some("Invalid PIN attempt".to_string()),
        }
    }

    pub fn deposit(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            action: AuditAction::Deposit,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: Some(format!("Amount=${:.2}", amount)),
        }
    }

    pub fn withdraw(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            action: AuditAction::Withdraw,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: Some(format!("Amount=${:.2}", amount)),
        }
    }

    pub fn withdraw_failure(account: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            action: AuditAction::Withdraw,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Failed,
            details: Some(reason.into()),
        }
    }

    pub fn account_locked(account: impl Into<String>, admin: &str) -> Self {
        Self {
            action: AuditAction::AccountLock,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: Some(format!("Locked by admin={}", admin)),
        }
    }

    pub fn account_unlocked(account: impl Into<String>, admin: &str) -> Self {
        Self {
            action: AuditAction::AccountUnlock,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: Some(format!("Unlocked by admin={}", admin)),
        }
    }

    pub fn account_migrated(account: impl Into<String>) -> Self {
        Self {
            action: AuditAction::AccountMigration,
            subject: Some(Subject::Account(account.into())),
            status: AuditStatus::Success,
            details: Some("Credentials established".to_string()),
        }
    }

    pub fn admin_login(user: impl Into<String>) -> Self {
        Self {
            action: AuditAction::AdminLogin,
            subject: Some(Subject::Admin(user.into())),
            status: AuditStatus::Success,
            details: None,
        }
    }

    pub fn admin_login_failure() -> Self {
        Self {
            action: AuditAction::AdminLogin,
            subject: None,
            status: AuditStatus::Failed,
            details: Some("Invalid password".to_string()),
        }
    }

    pub fn admin_logout(user: impl Into<String>) -> Self {
        Self {
            action: AuditAction::AdminLogout,
            subject: Some(Subject::Admin(user.into())),
            status: AuditStatus::Success,
            details: None,
        }
    }

    /// Render the event as one log line with the given wall-clock timestamp.
    pub fn format_line(&self, timestamp: DateTime<Local>) -> String {
        let mut line = format!(
            "[{}] ACTION={}",
            timestamp.format(TIMESTAMP_FORMAT),
            self.action
        );
        match &self.subject {
            Some(Subject::Account(number)) => {
                line.push_str(" account=");
                line.push_str(number);
            }
            Some(Subject::Admin(user)) => {
                line.push_str(" admin=");
                line.push_str(user);
            }
            None => {}
        }
        line.push_str(" status=");
        line.push_str(&self.status.to_string());
        if let Some(details) = &self.details {
            line.push_str(" details=");
            line.push_str(details);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn fixed_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 14, 2, 11).unwrap()
    }

    #[test]
    fn test_action_tags_are_screaming_snake() {
        assert_eq!(AuditAction::WrongPassword.to_string(), "WRONG_PASSWORD");
        assert_eq!(AuditAction::AccountMigration.to_string(), "ACCOUNT_MIGRATION");
        assert_eq!(AuditStatus::Failed.to_string(), "FAILED");
    }

    #[test]
    fn test_withdraw_line_format() {
        let event = AuditEvent::withdraw("1002003004", dec!(30));
        let line = event.format_line(fixed_timestamp());
        assert_eq!(
            line,
            "[2024-03-01 14:02:11] ACTION=WITHDRAW account=1002003004 status=SUCCESS details=Amount=$30.00"
        );
    }

    #[test]
    fn test_deposit_amount_has_two_decimals() {
        let event = AuditEvent::deposit("42", dec!(100));
        let line = event.format_line(fixed_timestamp());
        assert!(line.ends_with("details=Amount=$100.00"), "{line}");
    }

    #[test]
    fn test_login_success_has_no_details() {
        let event = AuditEvent::login_success("42");
        let line = event.format_line(fixed_timestamp());
        assert!(line.ends_with("ACTION=LOGIN account=42 status=SUCCESS"), "{line}");
    }

    #[test]
    fn test_admin_login_failure_has_no_subject() {
        let event = AuditEvent::admin_login_failure();
        let line = event.format_line(fixed_timestamp());
        assert!(
            line.ends_with("ACTION=ADMIN_LOGIN status=FAILED details=Invalid password"),
            "{line}"
        );
        assert!(!line.contains("admin="));
    }

    #[test]
    fn test_lock_line_names_the_admin() {
        let event = AuditEvent::account_locked("42", "ADMIN");
        let line = event.format_line(fixed_timestamp());
        assert!(line.contains("ACTION=ACCOUNT_LOCK account=42 status=SUCCESS"));
        assert!(line.ends_with("details=Locked by admin=ADMIN"));
    }
}
