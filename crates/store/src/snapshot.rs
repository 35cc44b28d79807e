//! JSON snapshot store for the account registry
//!
//! The registry persists as one pretty-printed JSON document: keys are
//! account numbers, values are full account records including the nested
//! transaction history. It is loaded wholesale at startup and rewritten
//! wholesale after every mutating operation.

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use teller_core::AccountNumber;
use teller_ledger::Account;

const SNAPSHOT_FILE_NAME: &str = "accounts.json";

/// Wholesale load/save of the account registry.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store inside the given data directory (created if absent).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(SNAPSHOT_FILE_NAME),
        })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has been written before
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the full registry.
    ///
    /// The document goes to a sibling temporary file first and is renamed
    /// over the target, so a crash mid-write cannot leave a half snapshot.
    pub fn save(&self, accounts: &BTreeMap<AccountNumber, Account>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(accounts)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the full registry. An absent file is an empty registry, not an
    /// error; a malformed file is a [`StoreError`].
    pub fn load(&self) -> Result<BTreeMap<AccountNumber, Account>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let accounts = serde_json::from_str(&json)?;
        Ok(accounts)
    }

    /// Like [`Self::load`], but degrades to an empty registry on any
    /// failure. Startup uses this: a corrupt data file must not keep the
    /// application from opening.
    pub fn load_or_default(&self) -> BTreeMap<AccountNumber, Account> {
        match self.load() {
            Ok(accounts) => accounts,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "Could not read account snapshot, starting empty"
                );
                BTreeMap::new()
            }
        }
    }
}
