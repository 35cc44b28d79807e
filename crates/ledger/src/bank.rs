//! Bank - In-memory account registry
//!
//! The bank owns every account plus the audit log, and is the only writer
//! of audit events: operations go through the wrappers here so that each
//! success or failure leaves the trail the original system produced.

use crate::account::Account;
use crate::error::LedgerError;
use crate::migration::MigrationCredentials;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use teller_audit::{AuditEvent, AuditLog};
use teller_auth::{verify_password, Pin};
use teller_core::{AccountNumber, Amount};

/// Outcome of the migration-aware login front door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRoute {
    /// Account has credentials; proceed to password authentication.
    Password,
    /// Account predates credentials; run the migration flow first.
    Migration,
}

/// Registry of accounts keyed by account number.
pub struct Bank {
    accounts: BTreeMap<AccountNumber, Account>,
    audit: AuditLog,
}

impl Bank {
    /// Empty bank writing audit events to the given log.
    pub fn new(audit: AuditLog) -> Self {
        Self {
            accounts: BTreeMap::new(),
            audit,
        }
    }

    /// Bank over a registry loaded from storage.
    pub fn with_accounts(accounts: BTreeMap<AccountNumber, Account>, audit: AuditLog) -> Self {
        Self { accounts, audit }
    }

    /// Open a new account.
    ///
    /// A blank or absent `requested_number` gets a generated 10-digit
    /// number; a supplied one is trimmed and must be unused. The PIN must
    /// pass the 4-digit format rule. Account creation leaves no audit line.
    pub fn create_account(
        &mut self,
        customer_name: &str,
        requested_number: Option<&str>,
        password: &str,
        pin: &str,
    ) -> Result<AccountNumber, LedgerError> {
        let pin = Pin::new(pin)?;
        let number = match requested_number {
            Some(raw) if !raw.trim().is_empty() => {
                let number = AccountNumber::new(raw)?;
                if self.accounts.contains_key(&number) {
                    return Err(LedgerError::DuplicateAccountNumber(number.to_string()));
                }
                number
            }
            _ => self.generate_account_number(),
        };

        let account = Account::open(number.clone(), customer_name, password, pin);
        self.accounts.insert(number.clone(), account);
        Ok(number)
    }

    fn generate_account_number(&self) -> AccountNumber {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = AccountNumber::from_digits(rng.gen_range(0..10_000_000_000u64));
            if !self.accounts.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Deposit into an account, returning the new balance.
    pub fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Amount, LedgerError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;
        // Failed deposits leave no audit line.
        account.deposit(amount)?;
        let balance = account.balance();
        self.record(AuditEvent::deposit(number, amount));
        Ok(balance)
    }

    /// Withdraw from an account, returning the new balance.
    ///
    /// Every failure mode of the withdrawal itself is audited; only an
    /// unknown account number is not (there is no subject to attribute).
    pub fn withdraw(
        &mut self,
        number: &str,
        amount: Decimal,
        pin: &str,
    ) -> Result<Amount, LedgerError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;
        let result = account.withdraw(amount, pin);
        let balance = account.balance();
        match &result {
            Ok(()) => self.record(AuditEvent::withdraw(number, amount)),
            Err(LedgerError::InvalidPin) => self.record(AuditEvent::wrong_pin(number)),
            Err(LedgerError::InvalidAmount(_)) => {
                self.record(AuditEvent::withdraw_failure(number, "Amount <= 0"))
            }
            Err(LedgerError::InsufficientBalance { .. }) => {
                self.record(AuditEvent::withdraw_failure(number, "Insufficient balance"))
            }
            Err(_) => {}
        }
        result.map(|()| balance)
    }

    /// Password login. The lock is enforced here and only here: a locked
    /// account fails before its password is even checked.
    pub fn authenticate_user(&self, number: &str, password: &str) -> Result<&Account, LedgerError> {
        let account = match self.accounts.get(number) {
            Some(account) => account,
            None => {
                self.record(AuditEvent::login_failure(number, "Account not found"));
                return Err(LedgerError::AccountNotFound(number.to_string()));
            }
        };
        if account.is_locked() {
            self.record(AuditEvent::login_failure(number, "Account locked"));
            return Err(LedgerError::AccountLocked(number.to_string()));
        }
        if !verify_password(password, account.password_hash()) {
            self.record(AuditEvent::wrong_password(number));
            return Err(LedgerError::PasswordMismatch);
        }
        self.record(AuditEvent::login_success(number));
        Ok(account)
    }

    /// Migration-aware front door for login.
    ///
    /// The migration check precedes the lock check, so a locked legacy
    /// account still reaches the migration flow.
    pub fn login_route(&self, number: &str) -> Result<LoginRoute, LedgerError> {
        let account = match self.accounts.get(number) {
            Some(account) => account,
            None => {
                self.record(AuditEvent::login_failure(number, "Account not found"));
                return Err(LedgerError::AccountNotFound(number.to_string()));
            }
        };
        if account.needs_migration() {
            Ok(LoginRoute::Migration)
        } else {
            Ok(LoginRoute::Password)
        }
    }

    /// Set the lock flag on an account. Audit is recorded by the admin
    /// session that authorized the action.
    pub fn lock_account(&mut self, number: &str) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;
        account.lock();
        Ok(())
    }

    /// Clear the lock flag on an account.
    pub fn unlock_account(&mut self, number: &str) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;
        account.unlock();
        Ok(())
    }

    /// Apply credentials collected by a completed migration flow.
    pub fn complete_migration(
        &mut self,
        credentials: MigrationCredentials,
    ) -> Result<(), LedgerError> {
        let MigrationCredentials {
            account_number,
            password_hash,
            pin,
        } = credentials;
        let account = self
            .accounts
            .get_mut(&account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))?;
        account.apply_migration(password_hash, pin);
        self.record(AuditEvent::account_migrated(account_number.as_str()));
        Ok(())
    }

    pub fn get_account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn account_exists(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// The full registry, read-only, in account-number order.
    pub fn accounts(&self) -> &BTreeMap<AccountNumber, Account> {
        &self.accounts
    }

    pub fn total_accounts(&self) -> usize {
        self.accounts.len()
    }

    /// Sum of all recorded balances.
    pub fn total_balance(&self) -> Decimal {
        self.accounts
            .values()
            .map(|account| account.balance().value())
            .sum()
    }

    /// Cross-check every account's balance against its history.
    pub fn verify_balances(&self) -> Result<(), LedgerError> {
        for account in self.accounts.values() {
            account.verify_balance()?;
        }
        Ok(())
    }

    /// Read access to the audit log for the admin views.
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// Append an audit event. Audit failures must never block or roll back
    /// the business operation, so errors are logged and swallowed here.
    pub(crate) fn record(&self, event: AuditEvent) {
        if let Err(err) = self.audit.append(&event) {
            tracing::error!(error = %err, "Failed to write audit log");
        }
    }
}
