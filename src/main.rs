//! Reality Agent - constraint-aware assistant
//!
//! Classifies requests, answers them from templates or learned patterns and
//! learns from feedback.

use clap::Parser;

// Use the library crate for all modules
use reality_agent::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging (WARN level by default, use RUST_LOG or --trace for more)
    let level = if cli.trace { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into())
        )
        .init();

    cli::run(cli)
}
