//! Rendering for the interactive screens

use chrono::Local;

use teller_audit::AuditTail;
use teller_ledger::{Account, Bank};

const WIDTH: usize = 60;

pub fn banner(title: &str) {
    println!("\n{}", "=".repeat(WIDTH));
    println!("{:^width$}", title, width = WIDTH);
    println!("{}", "=".repeat(WIDTH));
}

pub fn account_balance(account: &Account) {
    banner("ACCOUNT BALANCE");
    println!("Account Number : {}", account.account_number());
    println!("Account Holder : {}", account.customer_name());
    println!("Current Balance: ${:.2}", account.balance().value());
    println!("{}", "=".repeat(WIDTH));
}

pub fn account_details(account: &Account) {
    banner("ACCOUNT DETAILS");
    println!("Account Number : {}", account.account_number());
    println!("Account Holder : {}", account.customer_name());
    println!("Balance        : ${:.2}", account.balance().value());
    println!("Status         : {}", status_label(account));
    println!("Transactions   : {}", account.transactions().len());
    if account.needs_migration() {
        println!("⚠️  Legacy account - credentials not yet set up.");
    }
    println!("{}", "=".repeat(WIDTH));
}

pub fn transaction_history(account: &Account) {
    banner("TRANSACTION HISTORY");
    println!("Account: {}", account.account_number());
    if account.transactions().is_empty() {
        println!("No transactions found.");
    } else {
        println!("{:<12} {:>12}   {}", "TYPE", "AMOUNT", "DATE/TIME");
        println!("{}", "-".repeat(WIDTH));
        for tx in account.transactions() {
            let kind = tx.kind().to_string();
            let amount = format!("${:.2}", tx.amount().value());
            let when = tx
                .timestamp()
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S");
            println!("{kind:<12} {amount:>12}   {when}");
        }
    }
    println!("{}", "=".repeat(WIDTH));
}

pub fn all_accounts(bank: &Bank) {
    banner("ALL ACCOUNTS");
    if bank.total_accounts() == 0 {
        println!("No accounts found.");
    } else {
        println!(
            "{:<14} {:<24} {:>12}   {}",
            "ACCOUNT NO", "CUSTOMER NAME", "BALANCE", "STATUS"
        );
        println!("{}", "-".repeat(WIDTH));
        for account in bank.accounts().values() {
            let balance = format!("${:.2}", account.balance().value());
            println!(
                "{:<14} {:<24} {balance:>12}   {}",
                account.account_number().as_str(),
                account.customer_name(),
                status_label(account)
            );
        }
        println!("{}", "-".repeat(WIDTH));
        println!("Total accounts: {}", bank.total_accounts());
    }
    println!("{}", "=".repeat(WIDTH));
}

pub fn audit_lines(tail: &AuditTail) {
    banner("AUDIT LOGS");
    if tail.total == 0 {
        println!("No audit logs found.");
    } else {
        for line in &tail.lines {
            println!("{line}");
        }
        println!("{}", "-".repeat(WIDTH));
        println!("Showing {} of {} audit entries", tail.lines.len(), tail.total);
    }
    println!("{}", "=".repeat(WIDTH));
}

fn status_label(account: &Account) -> &'static str {
    if account.is_locked() {
        "🔒 LOCKED"
    } else {
        "ACTIVE"
    }
}
