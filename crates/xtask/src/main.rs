//! Development tasks for the character sheet workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{NewCharacter, Recompute, ShowRuleset};

/// Development tasks for the character sheet workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for character sheets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Recompute a character's derived stats
    Recompute(Recompute),

    /// Write a blank character sheet
    NewCharacter(NewCharacter),

    /// Print the governing-ability tables of a ruleset
    Ruleset(ShowRuleset),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SHEET_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Recompute(cmd) => cmd.execute(),
        Command::NewCharacter(cmd) => cmd.execute(),
        Command::Ruleset(cmd) => cmd.execute(),
    }
}

/// Log to stderr so command output on stdout stays machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
