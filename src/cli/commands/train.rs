//! Train command - Train a tabular Q-learner against built-in opponents

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{CommonConfig, LearnerArgs},
        output::{
            format_number, print_kv, print_policy, print_result, print_section, print_subsection,
        },
    },
    export::HistoryCsvObserver,
    opponents::OpponentKind,
    pipeline::{
        JsonlObserver, LogObserver, ProgressObserver, TrainingBlock, TrainingConfig,
        TrainingPipeline, TrainingResult, parse_schedule, total_rounds,
    },
    q_learning::{LearnerConfig, TabularQLearner},
    rps::Move,
};

#[derive(Parser, Debug)]
#[command(about = "Train a tabular Q-learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Opponent to train against (rock, paper, scissors, cycle, counter, frequency, markov, random)
    #[arg(long, short = 'o', default_value = "cycle")]
    pub opponent: String,

    /// Number of training rounds
    #[arg(long, short = 'n', default_value_t = 1000)]
    pub rounds: usize,

    /// Curriculum of opponent:rounds blocks, overrides --opponent/--rounds
    /// (e.g. "cycle:1000,markov:1000")
    #[arg(long, short = 'c')]
    pub curriculum: Option<String>,

    /// Evaluation rounds after training (0 disables)
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub eval_rounds: usize,

    /// Opponent for evaluation (defaults to the last training opponent)
    #[arg(long)]
    pub eval_opponent: Option<String>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL round observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional CSV file for the full round history
    #[arg(long)]
    pub history_csv: Option<PathBuf>,

    /// Print the greedy action of every state after training
    #[arg(long, default_value_t = false)]
    pub show_policy: bool,

    #[command(flatten)]
    pub common: CommonConfig,

    #[command(flatten)]
    pub learner: LearnerArgs,
}

#[derive(Debug, Serialize)]
struct EvaluationSummary {
    opponent: String,
    result: TrainingResult,
}

#[derive(Debug, Serialize)]
struct PolicyEntry {
    state: String,
    action: Move,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    evaluation: Option<EvaluationSummary>,
    schedule: Vec<TrainingBlock>,
    learner: LearnerConfig,
    policy: Vec<PolicyEntry>,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn resolve_schedule(args: &TrainArgs) -> Result<Vec<TrainingBlock>> {
    let schedule = match &args.curriculum {
        Some(curriculum) => parse_schedule(curriculum)?,
        None => vec![TrainingBlock::new(args.opponent.parse()?, args.rounds)],
    };
    if total_rounds(&schedule) == 0 {
        return Err(anyhow!("Training schedule has no rounds"));
    }
    Ok(schedule)
}

fn build_pipeline(args: &TrainArgs, rounds: usize) -> Result<TrainingPipeline> {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        rounds,
        seed: args.common.seed,
    });
    if args.common.progress() {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if args.common.log_interval > 0 {
        pipeline = pipeline.with_observer(Box::new(LogObserver::new(args.common.log_interval)));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    if let Some(path) = &args.history_csv {
        let observer = HistoryCsvObserver::new(path)
            .with_context(|| format!("Failed to create history file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    Ok(pipeline)
}

fn write_summary(path: &Path, summary: &TrainingSummaryFile) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    to_writer_pretty(file, summary).context("Failed to write training summary")?;
    Ok(())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.learner.to_config(args.common.seed)?;
    let schedule = resolve_schedule(&args)?;
    let all_rounds = total_rounds(&schedule);

    let eval_kind = match &args.eval_opponent {
        Some(raw) => raw.parse::<OpponentKind>()?,
        None => schedule
            .iter()
            .rev()
            .find(|block| block.rounds > 0)
            .map(|block| block.opponent)
            .ok_or_else(|| anyhow!("Training schedule has no rounds"))?,
    };

    let summary_path = args.summary.as_deref().map(sanitize_summary_path);

    let mut learner = TabularQLearner::new(config.clone())?;

    print_section("Training");
    for block in &schedule {
        print_kv(block.opponent.label(), &format_number(block.rounds));
    }
    let mut pipeline = build_pipeline(&args, all_rounds)?;
    let training = pipeline.run_curriculum(&mut learner, &schedule)?;
    print_result(&training);

    let evaluation = if args.eval_rounds > 0 {
        print_section(&format!("Evaluation vs {eval_kind}"));
        let mut eval_pipeline = TrainingPipeline::new(TrainingConfig {
            rounds: args.eval_rounds,
            seed: args.common.seed,
        });
        if args.common.progress() {
            eval_pipeline = eval_pipeline.with_observer(Box::new(ProgressObserver::new()));
        }
        let mut opponent = eval_kind.build();
        let result = eval_pipeline.evaluate(&mut learner, opponent.as_mut(), args.eval_rounds)?;
        print_result(&result);
        Some(EvaluationSummary {
            opponent: eval_kind.label().to_string(),
            result,
        })
    } else {
        None
    };

    let policy = learner.greedy_policy();
    if args.show_policy {
        print_subsection("Greedy policy");
        print_policy(&policy);
    }

    if let Some(path) = summary_path {
        let summary = TrainingSummaryFile {
            training,
            evaluation,
            schedule,
            learner: config,
            policy: policy
                .iter()
                .map(|(state, action)| PolicyEntry {
                    state: state.to_string(),
                    action: *action,
                })
                .collect(),
        };
        write_summary(&path, &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
