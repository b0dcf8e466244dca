//! Compare command - Train a fresh learner against every built-in opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::LearnerArgs,
        output::{format_percent, print_section},
    },
    opponents::OpponentKind,
    pipeline::{TrainingConfig, TrainingPipeline},
    q_learning::TabularQLearner,
};

#[derive(Parser, Debug)]
#[command(about = "Compare learning against every built-in opponent", allow_negative_numbers = true)]
pub struct CompareArgs {
    /// Training rounds per opponent
    #[arg(long, short = 'n', default_value_t = 5000)]
    pub rounds: usize,

    /// Evaluation rounds per opponent
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub eval_rounds: usize,

    /// Export comparison results to CSV
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub learner: LearnerArgs,
}

/// One row of the comparison table
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub opponent: String,
    pub train_win_rate: f64,
    pub eval_wins: usize,
    pub eval_draws: usize,
    pub eval_losses: usize,
    pub eval_win_rate: f64,
    pub final_epsilon: f64,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    println!(
        "Training {} rounds and evaluating {} rounds per opponent",
        args.rounds, args.eval_rounds
    );

    let rows = compare_all(&args)?;

    print_section("Comparison Results");
    println!(
        "  {:<12} {:>10} {:>16} {:>10} {:>8}",
        "opponent", "train win", "eval W-D-L", "eval win", "epsilon"
    );
    for row in &rows {
        println!(
            "  {:<12} {:>10} {:>16} {:>10} {:>8.4}",
            row.opponent,
            format_percent(row.train_win_rate),
            format!("{}-{}-{}", row.eval_wins, row.eval_draws, row.eval_losses),
            format_percent(row.eval_win_rate),
            row.final_epsilon
        );
    }

    if let Some(output_path) = &args.output {
        export_csv(&rows, output_path)?;
        println!("\nResults exported to: {}", output_path.display());
    }

    Ok(())
}

/// Train and evaluate one learner per built-in opponent
pub fn compare_all(args: &CompareArgs) -> Result<Vec<ComparisonRow>> {
    let mut rows = Vec::with_capacity(OpponentKind::ALL.len());
    for (idx, kind) in OpponentKind::ALL.iter().enumerate() {
        let seed = args.seed.map(|seed| seed.wrapping_add(idx as u64 * 10));
        let config = args.learner.to_config(seed)?;
        let mut learner = TabularQLearner::new(config)?;

        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            rounds: args.rounds,
            seed,
        });
        let mut opponent = kind.build();
        let training = pipeline
            .run(&mut learner, opponent.as_mut())
            .with_context(|| format!("Training against {kind} failed"))?;
        let evaluation = pipeline
            .evaluate(&mut learner, opponent.as_mut(), args.eval_rounds)
            .with_context(|| format!("Evaluation against {kind} failed"))?;

        rows.push(ComparisonRow {
            opponent: kind.label().to_string(),
            train_win_rate: training.win_rate,
            eval_wins: evaluation.wins,
            eval_draws: evaluation.draws,
            eval_losses: evaluation.losses,
            eval_win_rate: evaluation.win_rate,
            final_epsilon: evaluation.final_epsilon,
        });
    }
    Ok(rows)
}

fn export_csv(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<PathBuf>) -> CompareArgs {
        CompareArgs {
            rounds: 200,
            eval_rounds: 50,
            output,
            seed: Some(7),
            learner: LearnerArgs {
                actions: "R,P,S".to_string(),
                learning_rate: 0.25,
                discount: 0.8,
                epsilon: 1.0,
                epsilon_decay: 1e-3,
                min_epsilon: 0.01,
            },
        }
    }

    #[test]
    fn test_compare_covers_every_opponent() {
        let rows = compare_all(&args(None)).unwrap();
        assert_eq!(rows.len(), OpponentKind::ALL.len());
        for row in &rows {
            assert_eq!(row.eval_wins + row.eval_draws + row.eval_losses, 50);
        }
    }

    #[test]
    fn test_compare_exports_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.csv");
        let rows = compare_all(&args(Some(path.clone()))).unwrap();
        export_csv(&rows, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "opponent,train_win_rate,eval_wins,eval_draws,eval_losses,eval_win_rate,final_epsilon"
        );
        assert_eq!(lines.count(), OpponentKind::ALL.len());
    }
}
