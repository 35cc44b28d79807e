//! Validated stdin prompts
//!
//! Every reader re-asks until it gets usable input. A closed stdin surfaces
//! as an `UnexpectedEof` error so the menus can shut down cleanly instead of
//! spinning.

use std::io::{self, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

/// Reads a non-empty line, trimmed.
pub fn read_string(prompt: &str) -> io::Result<String> {
    loop {
        let input = read_raw(prompt)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            println!("❌ Input cannot be empty. Please try again.");
            continue;
        }
        return Ok(trimmed.to_string());
    }
}

/// Reads a decimal amount, re-prompting on anything unparsable.
pub fn read_decimal(prompt: &str) -> io::Result<Decimal> {
    loop {
        let input = read_raw(prompt)?;
        match Decimal::from_str(input.trim()) {
            Ok(value) => return Ok(value),
            Err(_) => println!("❌ Invalid amount. Please enter a number."),
        }
    }
}

/// Reads an integer menu choice or count.
pub fn read_i64(prompt: &str) -> io::Result<i64> {
    loop {
        let input = read_raw(prompt)?;
        match input.trim().parse::<i64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("❌ Invalid input. Please enter a number."),
        }
    }
}

fn read_raw(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(input)
}
