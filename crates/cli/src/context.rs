//! Application context - wires the bank, audit log and snapshot store together

use std::path::Path;

use teller_audit::AuditLog;
use teller_ledger::Bank;
use teller_store::{SnapshotStore, StoreError};

/// Everything the interactive menus need, loaded from one data directory.
pub struct AppContext {
    bank: Bank,
    store: SnapshotStore,
}

impl AppContext {
    /// Opens (or creates) the data directory and loads the account snapshot.
    ///
    /// A missing or unreadable snapshot starts the bank empty rather than
    /// refusing to launch.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let data_dir = data_dir.as_ref();

        let store = SnapshotStore::new(data_dir)?;
        let audit = AuditLog::new(data_dir.join("logs"))?;
        let accounts = store.load_or_default();

        tracing::info!(
            path = %store.path().display(),
            accounts = accounts.len(),
            "Loaded account snapshot"
        );

        let bank = Bank::with_accounts(accounts, audit);
        Ok(Self { bank, store })
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    /// Writes the current registry to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(self.bank.accounts())
    }

    pub fn snapshot_path(&self) -> &Path {
        self.store.path()
    }
}
