//! AdminSession - Administrator authorization gate
//!
//! Administrative operations exist only as methods on a session value, and
//! a session value exists only after [`AdminSession::login`] verified the
//! fixed admin credential. The session borrows the bank exclusively for
//! its lifetime, matching the single-operator model.

use crate::bank::Bank;
use crate::error::LedgerError;
use rust_decimal::Decimal;
use teller_audit::{AuditError, AuditEvent, AuditTail};
use teller_auth::{authenticate_admin, ADMIN_USER};

/// An authenticated administrator working on the bank.
pub struct AdminSession<'a> {
    bank: &'a mut Bank,
}

impl<'a> AdminSession<'a> {
    /// Authenticate against the fixed admin credential.
    ///
    /// Both outcomes are audited; the failure line carries no admin
    /// subject since nobody was authenticated.
    pub fn login(bank: &'a mut Bank, password: &str) -> Result<Self, LedgerError> {
        if !authenticate_admin(password) {
            bank.record(AuditEvent::admin_login_failure());
            return Err(LedgerError::PasswordMismatch);
        }
        bank.record(AuditEvent::admin_login(ADMIN_USER));
        Ok(Self { bank })
    }

    /// End the session, recording the logout.
    pub fn logout(self) {
        self.bank.record(AuditEvent::admin_logout(ADMIN_USER));
    }

    /// Read-only view of the bank for the admin screens.
    pub fn bank(&self) -> &Bank {
        self.bank
    }

    /// Lock an account, auditing the action with the admin subject.
    /// Only a successful lock is audited.
    pub fn lock_account(&mut self, number: &str) -> Result<(), LedgerError> {
        self.bank.lock_account(number)?;
        self.bank
            .record(AuditEvent::account_locked(number, ADMIN_USER));
        Ok(())
    }

    /// Unlock an account, auditing the action with the admin subject.
    pub fn unlock_account(&mut self, number: &str) -> Result<(), LedgerError> {
        self.bank.unlock_account(number)?;
        self.bank
            .record(AuditEvent::account_unlocked(number, ADMIN_USER));
        Ok(())
    }

    /// Last `limit` audit entries plus the total count.
    pub fn audit_tail(&self, limit: usize) -> Result<AuditTail, AuditError> {
        self.bank.audit_log().tail(limit)
    }

    /// Sum of all account balances.
    pub fn total_balance(&self) -> Decimal {
        self.bank.total_balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use teller_audit::AuditLog;
    use tempfile::TempDir;

    fn test_bank() -> (TempDir, Bank) {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::new(dir.path().join("logs")).unwrap();
        let mut bank = Bank::new(audit);
        bank.create_account("Alice", Some("42"), "password1", "1234")
            .unwrap();
        (dir, bank)
    }

    #[test]
    fn test_login_with_default_password() {
        let (_dir, mut bank) = test_bank();
        let session = AdminSession::login(&mut bank, "admin123").unwrap();
        session.logout();

        let lines = bank.audit_log().read_all().unwrap();
        assert!(lines[0].contains("ACTION=ADMIN_LOGIN admin=ADMIN status=SUCCESS"));
        assert!(lines[1].contains("ACTION=ADMIN_LOGOUT admin=ADMIN status=SUCCESS"));
    }

    #[test]
    fn test_login_failure_is_audited_without_subject() {
        let (_dir, mut bank) = test_bank();
        assert!(matches!(
            AdminSession::login(&mut bank, "letmein"),
            Err(LedgerError::PasswordMismatch)
        ));

        let lines = bank.audit_log().read_all().unwrap();
        let last = lines.last().unwrap();
        assert!(last.contains("ACTION=ADMIN_LOGIN status=FAILED details=Invalid password"));
        assert!(!last.contains("admin=ADMIN"));
    }

    #[test]
    fn test_lock_and_unlock_are_audited() {
        let (_dir, mut bank) = test_bank();
        {
            let mut session = AdminSession::login(&mut bank, "admin123").unwrap();
            session.lock_account("42").unwrap();
            assert!(session.bank().get_account("42").unwrap().is_locked());
            session.unlock_account("42").unwrap();
            session.logout();
        }

        let lines = bank.audit_log().read_all().unwrap();
        assert!(lines
            .iter()
            .any(|l| l.contains("ACTION=ACCOUNT_LOCK account=42 status=SUCCESS details=Locked by admin=ADMIN")));
        assert!(lines
            .iter()
            .any(|l| l.contains("ACTION=ACCOUNT_UNLOCK account=42 status=SUCCESS details=Unlocked by admin=ADMIN")));
    }

    #[test]
    fn test_lock_unknown_account_not_audited() {
        let (_dir, mut bank) = test_bank();
        {
            let mut session = AdminSession::login(&mut bank, "admin123").unwrap();
            assert!(matches!(
                session.lock_account("404"),
                Err(LedgerError::AccountNotFound(_))
            ));
            session.logout();
        }

        let lines = bank.audit_log().read_all().unwrap();
        assert!(!lines.iter().any(|l| l.contains("ACTION=ACCOUNT_LOCK")));
    }

    #[test]
    fn test_total_balance_and_audit_tail() {
        let (_dir, mut bank) = test_bank();
        bank.deposit("42", dec!(100)).unwrap();

        let session = AdminSession::login(&mut bank, "admin123").unwrap();
        assert_eq!(session.total_balance(), dec!(100));

        let tail = session.audit_tail(50).unwrap();
        assert_eq!(tail.total, 2); // deposit + admin login
        assert!(tail.lines[0].contains("ACTION=DEPOSIT"));
        session.logout();
    }
}
