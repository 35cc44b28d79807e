//! Account - Customer account aggregate
//!
//! An account owns its balance, credentials, lock flag, and the ordered
//! transaction history that derives the balance from zero. All mutation
//! goes through the operations here; the history is exposed read-only.

use crate::error::LedgerError;
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use teller_auth::{hash_password, verify_pin, PasswordHash, Pin};
use teller_core::{AccountNumber, Amount};

/// A customer account.
///
/// # Invariants
/// - `balance >= 0` at all times (`Amount` enforces this).
/// - Every balance change appends exactly one matching [`Transaction`];
///   summing the history always reproduces `balance`.
/// - `password_hash`/`pin` are `None` only for accounts loaded from data
///   files that predate credentials (an empty string in the file counts
///   as absent). Such accounts must pass migration before login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    account_number: AccountNumber,
    customer_name: String,
    balance: Amount,
    #[serde(
        default,
        deserialize_with = "de_password_hash",
        skip_serializing_if = "Option::is_none"
    )]
    password_hash: Option<PasswordHash>,
    #[serde(default, deserialize_with = "de_pin", skip_serializing_if = "Option::is_none")]
    pin: Option<Pin>,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Account {
    /// Open a new account with full credentials and a zero balance.
    pub fn open(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        password: &str,
        pin: Pin,
    ) -> Self {
        Self {
            account_number,
            customer_name: customer_name.into(),
            balance: Amount::ZERO,
            password_hash: Some(hash_password(password)),
            pin: Some(pin),
            locked: false,
            transactions: Vec::new(),
        }
    }

    /// Account as found in data files written before credentials were
    /// required: no password digest, no PIN, pending migration.
    pub fn legacy(account_number: AccountNumber, customer_name: impl Into<String>) -> Self {
        Self {
            account_number,
            customer_name: customer_name.into(),
            balance: Amount::ZERO,
            password_hash: None,
            pin: None,
            locked: false,
            transactions: Vec::new(),
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    pub fn pin(&self) -> Option<&Pin> {
        self.pin.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Read-only view of the transaction history, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True iff the account still lacks a password digest or PIN and must
    /// run migration before it can log in.
    pub fn needs_migration(&self) -> bool {
        self.password_hash.is_none() || self.pin.is_none()
    }

    /// Add money to the account.
    ///
    /// The lock flag is not consulted here: locking gates login, not the
    /// balance operations themselves.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = Amount::positive(amount).map_err(|_| LedgerError::InvalidAmount(amount))?;
        self.balance = self
            .balance
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.transactions
            .push(Transaction::new(TransactionKind::Deposit, amount));
        Ok(())
    }

    /// Take money out of the account.
    ///
    /// Check order is significant and fixed: PIN first (a wrong PIN wins
    /// over any amount problem), then amount validity, then balance
    /// sufficiency. Like [`Self::deposit`], the lock flag is not consulted.
    pub fn withdraw(&mut self, amount: Decimal, supplied_pin: &str) -> Result<(), LedgerError> {
        if !verify_pin(supplied_pin, self.pin.as_ref()) {
            return Err(LedgerError::InvalidPin);
        }
        let amount = Amount::positive(amount).map_err(|_| LedgerError::InvalidAmount(amount))?;
        let remaining = self
            .balance
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                requested: amount.value(),
                available: self.balance.value(),
            })?;
        self.balance = remaining;
        self.transactions
            .push(Transaction::new(TransactionKind::Withdraw, amount));
        Ok(())
    }

    /// Set the lock flag. Idempotent.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Clear the lock flag. Idempotent.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Balance recomputed from the transaction history alone.
    pub fn derived_balance(&self) -> Decimal {
        self.transactions
            .iter()
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Cross-check the recorded balance against the history.
    pub fn verify_balance(&self) -> Result<(), LedgerError> {
        let derived = self.derived_balance();
        if derived != self.balance.value() {
            return Err(LedgerError::BalanceMismatch {
                account: self.account_number.to_string(),
                recorded: self.balance.value(),
                derived,
            });
        }
        Ok(())
    }

    /// Install migrated credentials. Migration always leaves the account
    /// usable, so the lock flag is cleared unconditionally.
    pub(crate) fn apply_migration(&mut self, password_hash: PasswordHash, pin: Pin) {
        self.password_hash = Some(password_hash);
        self.pin = Some(pin);
        self.locked = false;
    }
}

// Data files written by older versions store missing credentials as ""
// rather than omitting the field; both forms load as "no credential".
fn de_password_hash<'de, D>(deserializer: D) -> Result<Option<PasswordHash>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PasswordHash::from))
}

fn de_pin<'de, D>(deserializer: D) -> Result<Option<Pin>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            Pin::new(&raw).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}
