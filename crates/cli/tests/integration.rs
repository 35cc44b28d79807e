//! End-to-end tests for the Teller application context
//!
//! These drive complete flows through the context: ledger operations, audit
//! logging and snapshot persistence against a real data directory.

use std::collections::BTreeMap;
use std::fs;

use rust_decimal_macros::dec;
use tempfile::TempDir;

use teller_cli::AppContext;
use teller_core::AccountNumber;
use teller_ledger::{Account, AdminSession, LedgerError, LoginRoute, Migration, TransactionKind};
use teller_store::SnapshotStore;

fn new_context(dir: &TempDir) -> AppContext {
    AppContext::new(dir.path()).unwrap()
}

#[test]
fn test_customer_workflow_survives_restart() {
    let dir = TempDir::new().unwrap();
    let number = {
        let mut ctx = new_context(&dir);
        let number = ctx
            .bank_mut()
            .create_account("Alice", None, "password1", "1234")
            .unwrap();
        assert_eq!(number.as_str().len(), 10);

        ctx.bank_mut().deposit(number.as_str(), dec!(100)).unwrap();
        let balance = ctx
            .bank_mut()
            .withdraw(number.as_str(), dec!(30), "1234")
            .unwrap();
        assert_eq!(balance.value(), dec!(70));

        let err = ctx
            .bank_mut()
            .withdraw(number.as_str(), dec!(1000), "1234")
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

        ctx.save().unwrap();
        number
    };

    // A fresh context over the same directory sees the same state.
    let ctx = new_context(&dir);
    let account = ctx.bank().get_account(number.as_str()).unwrap();
    assert_eq!(account.customer_name(), "Alice");
    assert_eq!(account.balance().value(), dec!(70));
    let kinds: Vec<_> = account.transactions().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![TransactionKind::Deposit, TransactionKind::Withdraw]
    );
    ctx.bank().verify_balances().unwrap();

    let account = ctx
        .bank()
        .authenticate_user(number.as_str(), "password1")
        .unwrap();
    assert_eq!(account.account_number().as_str(), number.as_str());
}

#[test]
fn test_operations_leave_audit_trail_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut ctx = new_context(&dir);
    ctx.bank_mut()
        .create_account("Alice", Some("42"), "pw", "1234")
        .unwrap();
    ctx.bank_mut().deposit("42", dec!(10)).unwrap();
    let _ = ctx.bank_mut().withdraw("42", dec!(99), "1234");

    let log = fs::read_to_string(dir.path().join("logs").join("audit.log")).unwrap();
    assert!(log.contains("ACTION=DEPOSIT account=42 status=SUCCESS details=Amount=$10.00"));
    assert!(log.contains("ACTION=WITHDRAW account=42 status=FAILED details=Insufficient balance"));
}

#[test]
fn test_admin_lock_blocks_login_but_not_withdraw() {
    let dir = TempDir::new().unwrap();
    let mut ctx = new_context(&dir);
    ctx.bank_mut()
        .create_account("Alice", Some("42"), "password1", "1234")
        .unwrap();
    ctx.bank_mut().deposit("42", dec!(100)).unwrap();

    {
        let mut session = AdminSession::login(ctx.bank_mut(), "admin123").unwrap();
        session.lock_account("42").unwrap();
        let tail = session.audit_tail(50).unwrap();
        assert!(tail
            .lines
            .iter()
            .any(|l| l.contains("ACTION=ADMIN_LOGIN admin=ADMIN status=SUCCESS")));
        assert!(tail
            .lines
            .iter()
            .any(|l| l.contains("ACTION=ACCOUNT_LOCK account=42 status=SUCCESS")));
        session.logout();
    }

    assert!(matches!(
        ctx.bank().authenticate_user("42", "password1"),
        Err(LedgerError::AccountLocked(_))
    ));
    // The lock is not a migration: the front door still routes to password.
    assert_eq!(ctx.bank().login_route("42").unwrap(), LoginRoute::Password);

    // The lock gates login only; the balance operations still work.
    let balance = ctx.bank_mut().withdraw("42", dec!(30), "1234").unwrap();
    assert_eq!(balance.value(), dec!(70));

    {
        let mut session = AdminSession::login(ctx.bank_mut(), "admin123").unwrap();
        session.unlock_account("42").unwrap();
        session.logout();
    }
    assert!(ctx.bank().authenticate_user("42", "password1").is_ok());
}

#[test]
fn test_admin_login_rejects_wrong_password() {
    let dir = TempDir::new().unwrap();
    let mut ctx = new_context(&dir);
    assert!(AdminSession::login(ctx.bank_mut(), "letmein").is_err());

    let log = fs::read_to_string(dir.path().join("logs").join("audit.log")).unwrap();
    assert!(log.contains("ACTION=ADMIN_LOGIN status=FAILED details=Invalid password"));
}

#[test]
fn test_legacy_account_migration_end_to_end() {
    let dir = TempDir::new().unwrap();
    {
        // Data file as an older deployment would have left it: a funded,
        // admin-locked account with no credentials.
        let mut legacy =
            Account::legacy(AccountNumber::new("5550001111").unwrap(), "Old Customer");
        legacy.deposit(dec!(250)).unwrap();
        legacy.lock();
        let mut accounts = BTreeMap::new();
        accounts.insert(legacy.account_number().clone(), legacy);
        SnapshotStore::new(dir.path())
            .unwrap()
            .save(&accounts)
            .unwrap();
    }

    let mut ctx = new_context(&dir);
    assert_eq!(
        ctx.bank().login_route("5550001111").unwrap(),
        LoginRoute::Migration
    );

    let mut migration =
        Migration::begin(ctx.bank().get_account("5550001111").unwrap()).unwrap();
    migration.verify_identity("5550001111").unwrap();
    migration.set_password("fresh-pass", "fresh-pass").unwrap();
    let credentials = migration.set_pin("8642", "8642").unwrap();
    ctx.bank_mut().complete_migration(credentials).unwrap();
    ctx.save().unwrap();

    // Migration set credentials, cleared the admin lock and kept the balance.
    let account = ctx
        .bank()
        .authenticate_user("5550001111", "fresh-pass")
        .unwrap();
    assert!(!account.needs_migration());
    assert!(!account.is_locked());
    assert_eq!(account.balance().value(), dec!(250));
    assert_eq!(
        ctx.bank().login_route("5550001111").unwrap(),
        LoginRoute::Password
    );

    // And the new credentials survive a restart.
    let mut ctx = new_context(&dir);
    ctx.bank()
        .authenticate_user("5550001111", "fresh-pass")
        .unwrap();
    let balance = ctx
        .bank_mut()
        .withdraw("5550001111", dec!(50), "8642")
        .unwrap();
    assert_eq!(balance.value(), dec!(200));

    let log = fs::read_to_string(dir.path().join("logs").join("audit.log")).unwrap();
    assert!(log.contains("ACTION=ACCOUNT_MIGRATION account=5550001111 status=SUCCESS"));
}

#[test]
fn test_cancelled_migration_leaves_account_untouched() {
    let dir = TempDir::new().unwrap();
    {
        let legacy = Account::legacy(AccountNumber::new("7").unwrap(), "Old Customer");
        let mut accounts = BTreeMap::new();
        accounts.insert(legacy.account_number().clone(), legacy);
        SnapshotStore::new(dir.path())
            .unwrap()
            .save(&accounts)
            .unwrap();
    }

    let ctx = new_context(&dir);
    let mut migration = Migration::begin(ctx.bank().get_account("7").unwrap()).unwrap();
    assert!(migration.verify_identity("8").is_err());

    let account = ctx.bank().get_account("7").unwrap();
    assert!(account.needs_migration());
    assert_eq!(ctx.bank().login_route("7").unwrap(), LoginRoute::Migration);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("accounts.json"), "{ not json").unwrap();

    let ctx = new_context(&dir);
    assert_eq!(ctx.bank().total_accounts(), 0);
}

#[test]
fn test_missing_data_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("nested").join("data");

    let mut ctx = AppContext::new(&data).unwrap();
    ctx.bank_mut()
        .create_account("Alice", Some("1"), "pw", "1234")
        .unwrap();
    ctx.save().unwrap();

    assert!(data.join("accounts.json").exists());
    assert!(!data.join("accounts.json.tmp").exists());
}
