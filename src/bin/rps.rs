//! RPS CLI - Train and compare tabular Q-learners at Rock-Paper-Scissors
//!
//! This CLI provides a unified interface for:
//! - Training a learner against one opponent or a curriculum
//! - Comparing learning outcomes across all built-in opponents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rps")]
#[command(version, about = "Tabular Q-learning for Rock-Paper-Scissors", long_about = None)]
struct Cli {
    /// Enable debug logging for the learner
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learner against an opponent or a curriculum
    Train(Box<rps_qlearning::cli::commands::train::TrainArgs>),

    /// Train against every built-in opponent and compare the results
    Compare(rps_qlearning::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rps_qlearning::logging::init(cli.verbose);

    match cli.command {
        Commands::Train(args) => rps_qlearning::cli::commands::train::execute(*args),
        Commands::Compare(args) => rps_qlearning::cli::commands::compare::execute(args),
    }
}
