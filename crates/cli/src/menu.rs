//! Interactive menu loops
//!
//! Three tiers: the main menu, the customer menu reached after login and the
//! admin panel. Mutations persist the snapshot as soon as they succeed so a
//! crash never loses more than the prompt in progress.

use teller_auth::{admin_password_hint, is_valid_pin};
use teller_core::AccountNumber;
use teller_ledger::{AdminSession, LoginRoute, Migration};

use crate::context::AppContext;
use crate::prompt;
use crate::view;

const DEFAULT_AUDIT_LIMIT: usize = 50;

/// Runs the main menu until the user exits or stdin closes.
pub fn run(ctx: &mut AppContext) -> anyhow::Result<()> {
    view::banner("WELCOME TO TELLER BANK");
    loop {
        println!("\n========== MAIN MENU ==========");
        println!("1. Customer Login");
        println!("2. Create New Account");
        println!("3. Migrate Old Account");
        println!("4. Admin Login");
        println!("5. Exit");
        let choice = prompt::read_i64("Enter your choice: ")?;
        match choice {
            1 => customer_login(ctx)?,
            2 => create_account(ctx)?,
            3 => migrate_account(ctx)?,
            4 => admin_login(ctx)?,
            5 => {
                persist(ctx);
                println!("Thank you for banking with us. Goodbye!");
                return Ok(());
            }
            _ => println!("❌ Invalid choice. Please try again."),
        }
    }
}

fn customer_login(ctx: &mut AppContext) -> anyhow::Result<()> {
    view::banner("CUSTOMER LOGIN");
    let number = prompt::read_string("Enter account number: ")?;

    // Legacy accounts are sent through migration before any password prompt.
    match ctx.bank().login_route(&number) {
        Ok(LoginRoute::Password) => {}
        Ok(LoginRoute::Migration) => {
            println!("⚠️  This account needs a security upgrade before it can log in.");
            return run_migration(ctx, &number);
        }
        Err(err) => {
            println!("❌ {err}");
            return Ok(());
        }
    }

    let password = prompt::read_string("Enter password: ")?;
    let (number, name) = match ctx.bank().authenticate_user(&number, &password) {
        Ok(account) => (
            account.account_number().clone(),
            account.customer_name().to_string(),
        ),
        Err(err) => {
            println!("❌ {err}");
            return Ok(());
        }
    };

    println!("✅ Login successful. Welcome, {name}!");
    customer_menu(ctx, &number)
}

fn customer_menu(ctx: &mut AppContext, number: &AccountNumber) -> anyhow::Result<()> {
    loop {
        println!("\n========== CUSTOMER MENU ==========");
        println!("1. Deposit");
        println!("2. Withdraw");
        println!("3. Check Balance");
        println!("4. View Transactions");
        println!("5. Logout");
        let choice = prompt::read_i64("Enter your choice: ")?;
        match choice {
            1 => deposit(ctx, number)?,
            2 => withdraw(ctx, number)?,
            3 => check_balance(ctx, number),
            4 => view_transactions(ctx, number),
            5 => {
                println!("✅ Logged out successfully.");
                return Ok(());
            }
            _ => println!("❌ Invalid choice. Please try again."),
        }
    }
}

fn deposit(ctx: &mut AppContext, number: &AccountNumber) -> anyhow::Result<()> {
    let amount = prompt::read_decimal("Enter deposit amount: $")?;
    match ctx.bank_mut().deposit(number.as_str(), amount) {
        Ok(balance) => {
            println!("✅ Deposit successful. New balance: ${:.2}", balance.value());
            persist(ctx);
        }
        Err(err) => println!("❌ Deposit failed: {err}"),
    }
    Ok(())
}

fn withdraw(ctx: &mut AppContext, number: &AccountNumber) -> anyhow::Result<()> {
    let amount = prompt::read_decimal("Enter withdrawal amount: $")?;
    let pin = prompt::read_string("Enter your PIN: ")?;
    match ctx.bank_mut().withdraw(number.as_str(), amount, &pin) {
        Ok(balance) => {
            println!(
                "✅ Withdrawal successful. New balance: ${:.2}",
                balance.value()
            );
            persist(ctx);
        }
        Err(err) => println!("❌ Withdrawal failed: {err}"),
    }
    Ok(())
}

fn check_balance(ctx: &AppContext, number: &AccountNumber) {
    match ctx.bank().get_account(number.as_str()) {
        Some(account) => view::account_balance(account),
        None => println!("❌ Account not found: {number}"),
    }
}

fn view_transactions(ctx: &AppContext, number: &AccountNumber) {
    match ctx.bank().get_account(number.as_str()) {
        Some(account) => view::transaction_history(account),
        None => println!("❌ Account not found: {number}"),
    }
}

fn create_account(ctx: &mut AppContext) -> anyhow::Result<()> {
    view::banner("CREATE NEW ACCOUNT");
    let name = prompt::read_string("Enter your full name: ")?;
    let password = prompt::read_string("Create a password: ")?;
    let pin = loop {
        let candidate = prompt::read_string("Create a 4-digit PIN: ")?;
        if is_valid_pin(&candidate) {
            break candidate;
        }
        println!("❌ PIN must be exactly 4 digits.");
    };

    let choice = prompt::read_string("Use a custom account number? (y/n): ")?;
    let requested = if matches!(choice.to_lowercase().as_str(), "y" | "yes") {
        Some(prompt::read_string("Enter custom account number: ")?)
    } else {
        None
    };

    match ctx
        .bank_mut()
        .create_account(&name, requested.as_deref(), &password, &pin)
    {
        Ok(number) => {
            println!("✅ Account created successfully!");
            println!("   Your account number is: {number}");
            println!("   Keep it safe - you need it to log in.");
            persist(ctx);
        }
        Err(err) => println!("❌ Could not create account: {err}"),
    }
    Ok(())
}

fn migrate_account(ctx: &mut AppContext) -> anyhow::Result<()> {
    view::banner("ACCOUNT MIGRATION");
    let number = prompt::read_string("Enter your account number: ")?;
    run_migration(ctx, &number)
}

fn run_migration(ctx: &mut AppContext, number: &str) -> anyhow::Result<()> {
    let mut migration = match ctx.bank().get_account(number) {
        Some(account) => match Migration::begin(account) {
            Ok(migration) => migration,
            Err(err) => {
                println!("❌ {err}");
                return Ok(());
            }
        },
        None => {
            println!("❌ Account not found: {number}");
            return Ok(());
        }
    };

    println!("This account predates passwords and PINs.");
    println!("Let's set up your new credentials.");

    let entered = prompt::read_string("Re-enter your account number to confirm: ")?;
    if let Err(err) = migration.verify_identity(&entered) {
        println!("❌ Migration cancelled: {err}");
        return Ok(());
    }

    let password = prompt::read_string("Create a password: ")?;
    let confirm = prompt::read_string("Confirm password: ")?;
    if let Err(err) = migration.set_password(&password, &confirm) {
        println!("❌ Migration cancelled: {err}");
        return Ok(());
    }

    let pin = prompt::read_string("Create a 4-digit PIN: ")?;
    let pin_confirm = prompt::read_string("Confirm PIN: ")?;
    let credentials = match migration.set_pin(&pin, &pin_confirm) {
        Ok(credentials) => credentials,
        Err(err) => {
            println!("❌ Migration cancelled: {err}");
            return Ok(());
        }
    };

    match ctx.bank_mut().complete_migration(credentials) {
        Ok(()) => {
            println!("✅ Migration complete. You can now log in with your new credentials.");
            persist(ctx);
        }
        Err(err) => println!("❌ Migration failed: {err}"),
    }
    Ok(())
}

fn admin_login(ctx: &mut AppContext) -> anyhow::Result<()> {
    view::banner("ADMIN LOGIN");
    println!("{}", admin_password_hint());
    let password = prompt::read_string("Enter admin password: ")?;

    let mut session = match AdminSession::login(ctx.bank_mut(), &password) {
        Ok(session) => session,
        Err(err) => {
            println!("❌ {err}");
            return Ok(());
        }
    };
    println!("✅ Admin login successful.");

    let outcome = admin_menu(&mut session);
    session.logout();
    persist(ctx);
    outcome
}

fn admin_menu(session: &mut AdminSession<'_>) -> anyhow::Result<()> {
    loop {
        println!("\n========== ADMIN PANEL ==========");
        println!("1. View All Accounts");
        println!("2. Search Account by Number");
        println!("3. View Total Bank Balance");
        println!("4. View All Transactions of Any Account");
        println!("5. Lock/Unlock Account");
        println!("6. View Audit Logs");
        println!("7. Exit Admin Panel");
        let choice = prompt::read_i64("Enter your choice: ")?;
        match choice {
            1 => view::all_accounts(session.bank()),
            2 => search_account(session)?,
            3 => {
                view::banner("TOTAL BANK BALANCE");
                println!(
                    "Total across {} accounts: ${:.2}",
                    session.bank().total_accounts(),
                    session.total_balance()
                );
            }
            4 => admin_view_transactions(session)?,
            5 => toggle_lock(session)?,
            6 => view_audit_logs(session)?,
            7 => {
                println!("✅ Exiting admin panel.");
                return Ok(());
            }
            _ => println!("❌ Invalid choice. Please try again."),
        }
    }
}

fn search_account(session: &AdminSession<'_>) -> anyhow::Result<()> {
    let number = prompt::read_string("Enter account number: ")?;
    match session.bank().get_account(&number) {
        Some(account) => view::account_details(account),
        None => println!("❌ Account not found: {number}"),
    }
    Ok(())
}

fn admin_view_transactions(session: &AdminSession<'_>) -> anyhow::Result<()> {
    let number = prompt::read_string("Enter account number: ")?;
    match session.bank().get_account(&number) {
        Some(account) => view::transaction_history(account),
        None => println!("❌ Account not found: {number}"),
    }
    Ok(())
}

fn toggle_lock(session: &mut AdminSession<'_>) -> anyhow::Result<()> {
    let number = prompt::read_string("Enter account number: ")?;
    let locked = match session.bank().get_account(&number) {
        Some(account) => account.is_locked(),
        None => {
            println!("❌ Account not found: {number}");
            return Ok(());
        }
    };
    println!(
        "Account {number} is currently {}.",
        if locked { "LOCKED" } else { "ACTIVE" }
    );

    let action = prompt::read_string("Type 'lock' or 'unlock' (anything else cancels): ")?;
    let result = match action.to_lowercase().as_str() {
        "lock" => session.lock_account(&number).map(|()| "locked"),
        "unlock" => session.unlock_account(&number).map(|()| "unlocked"),
        _ => {
            println!("No change made.");
            return Ok(());
        }
    };
    match result {
        Ok(word) => println!("✅ Account {number} {word}."),
        Err(err) => println!("❌ {err}"),
    }
    Ok(())
}

fn view_audit_logs(session: &AdminSession<'_>) -> anyhow::Result<()> {
    let limit = prompt::read_i64("How many recent entries? (default 50): ")?;
    let limit = if limit <= 0 {
        DEFAULT_AUDIT_LIMIT
    } else {
        limit as usize
    };
    match session.audit_tail(limit) {
        Ok(tail) => view::audit_lines(&tail),
        Err(err) => println!("❌ Could not read audit log: {err}"),
    }
    Ok(())
}

fn persist(ctx: &AppContext) {
    match ctx.save() {
        Ok(()) => println!("✅ Data saved to {}", ctx.snapshot_path().display()),
        Err(err) => println!("❌ Error saving data: {err}"),
    }
}
