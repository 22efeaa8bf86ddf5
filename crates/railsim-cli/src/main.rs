//! Railsim CLI — run comparative settlement simulations.
//!
//! Subcommands: compare, line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Railsim — the same payments on two settlement rails.
#[derive(Parser, Debug)]
#[command(name = "railsim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an identical workload on the base ledger and the channel
    /// network, and print metrics for both.
    Compare(commands::compare::CompareArgs),
    /// Send a single payment across a five-node channel line.
    Line(commands::line::LineArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Line(args) => commands::line::run(args),
    }
}
