//! Migration - Credential upgrade for legacy accounts
//!
//! Accounts loaded from old data files may lack a password digest or PIN.
//! Until both exist the account cannot log in; this flow collects new
//! credentials step by step and hands back a [`MigrationCredentials`] value
//! that [`crate::Bank::complete_migration`] applies in one move.
//!
//! The machine never touches the account itself. A cancelled or abandoned
//! flow therefore leaves the account exactly as it was.

use crate::account::Account;
use crate::error::LedgerError;
use teller_auth::{hash_password, PasswordHash, Pin};
use teller_core::AccountNumber;

/// Where a migration flow currently rests.
///
/// `NeedsMigration` is the account-level predicate
/// ([`Account::needs_migration`]) that gates entry; a constructed machine
/// starts at `Verifying` and only moves forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    /// Waiting for the identity check (re-entry of the account number).
    Verifying,
    /// Identity confirmed; waiting for the new password and confirmation.
    SettingPassword,
    /// Password accepted; waiting for the new PIN and confirmation.
    SettingPin { password: String },
    /// Credentials collected and handed out; terminal.
    Complete,
    /// Flow aborted; terminal, the account is unchanged.
    Cancelled,
}

/// Credentials produced by a completed migration flow.
///
/// Constructed only by [`Migration::set_pin`], so holding one proves the
/// full flow ran; applied only by [`crate::Bank::complete_migration`].
#[derive(Debug, Clone)]
pub struct MigrationCredentials {
    pub(crate) account_number: AccountNumber,
    pub(crate) password_hash: PasswordHash,
    pub(crate) pin: Pin,
}

impl MigrationCredentials {
    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }
}

/// One in-flight credential migration.
#[derive(Debug)]
pub struct Migration {
    account_number: AccountNumber,
    state: MigrationState,
}

impl Migration {
    /// Start a migration for the given account.
    ///
    /// Accounts that already hold full credentials are refused.
    pub fn begin(account: &Account) -> Result<Self, LedgerError> {
        if !account.needs_migration() {
            return Err(LedgerError::MigrationNotRequired(
                account.account_number().to_string(),
            ));
        }
        Ok(Self {
            account_number: account.account_number().clone(),
            state: MigrationState::Verifying,
        })
    }

    pub fn state(&self) -> &MigrationState {
        &self.state
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Step 1: the caller re-enters the account number as an identity
    /// check. A mismatch cancels the flow.
    pub fn verify_identity(&mut self, entered_number: &str) -> Result<(), LedgerError> {
        if self.state != MigrationState::Verifying {
            return Err(out_of_step());
        }
        if entered_number.trim() != self.account_number.as_str() {
            return Err(self.cancel("account number does not match"));
        }
        self.state = MigrationState::SettingPassword;
        Ok(())
    }

    /// Step 2: choose the new password. A confirmation mismatch cancels
    /// the flow.
    pub fn set_password(&mut self, password: &str, confirm: &str) -> Result<(), LedgerError> {
        if self.state != MigrationState::SettingPassword {
            return Err(out_of_step());
        }
        if password != confirm {
            return Err(self.cancel("passwords do not match"));
        }
        self.state = MigrationState::SettingPin {
            password: password.to_string(),
        };
        Ok(())
    }

    /// Step 3: choose the new PIN, validated by the same 4-digit rule as
    /// account creation. Success completes the flow and yields the
    /// credentials to apply.
    pub fn set_pin(
        &mut self,
        pin: &str,
        confirm: &str,
    ) -> Result<MigrationCredentials, LedgerError> {
        let password = match &self.state {
            MigrationState::SettingPin { password } => password.clone(),
            _ => return Err(out_of_step()),
        };
        let pin = match Pin::new(pin) {
            Ok(pin) => pin,
            Err(_) => return Err(self.cancel("PIN must be exactly 4 digits")),
        };
        if pin.as_str() != confirm {
            return Err(self.cancel("PINs do not match"));
        }

        self.state = MigrationState::Complete;
        Ok(MigrationCredentials {
            account_number: self.account_number.clone(),
            password_hash: hash_password(&password),
            pin,
        })
    }

    fn cancel(&mut self, reason: &'static str) -> LedgerError {
        self.state = MigrationState::Cancelled;
        LedgerError::MigrationCancelled { reason }
    }
}

// Calling a step in the wrong order fails without disturbing a terminal
// state, so a finished flow keeps reporting Complete/Cancelled.
fn out_of_step() -> LedgerError {
    LedgerError::MigrationCancelled {
        reason: "migration step out of sequence",
    }
}
