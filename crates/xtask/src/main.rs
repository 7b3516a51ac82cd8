//! Development tasks for the condition engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Simulate};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Development tasks for the condition engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for game conditions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect serialized condition files
    Inspect(Inspect),

    /// Tick a condition template against an in-memory creature
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CONDITION_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    // Engine logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
