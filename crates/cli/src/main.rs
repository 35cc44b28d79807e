//! Teller CLI - Main entry point

use std::path::PathBuf;

use clap::Parser;

use teller_cli::{menu, AppContext};

#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Teller - Interactive banking simulator", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(&cli.data)?;
    menu::run(&mut ctx)
}
