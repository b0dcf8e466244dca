//! Shared configuration types for CLI commands

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{q_learning::LearnerConfig, rps::Move};

/// Common configuration shared across commands
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide progress bars
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Log training progress every N rounds (0 disables)
    #[arg(long, default_value_t = 0)]
    pub log_interval: usize,
}

impl CommonConfig {
    pub fn progress(&self) -> bool {
        !self.no_progress
    }
}

/// Learner hyper-parameters as command-line flags
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct LearnerArgs {
    /// Comma-separated action set in column order (e.g. R,P,S)
    #[arg(long, default_value = "R,P,S")]
    pub actions: String,

    /// Learning rate α (0.0-1.0]
    #[arg(long, default_value_t = 0.25)]
    pub learning_rate: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.8)]
    pub discount: f64,

    /// Initial exploration rate ε
    #[arg(long, default_value_t = 1.0)]
    pub epsilon: f64,

    /// Exponential epsilon decay rate λ (ε ← ε·exp(-λ·step))
    #[arg(long, default_value_t = 1e-4)]
    pub epsilon_decay: f64,

    /// Exploration floor
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,
}

impl LearnerArgs {
    /// Build and validate a learner configuration
    pub fn to_config(&self, seed: Option<u64>) -> Result<LearnerConfig> {
        let actions = parse_actions(&self.actions)?;
        let mut config = LearnerConfig::default()
            .with_actions(actions)
            .with_learning_rate(self.learning_rate)
            .with_discount_factor(self.discount)
            .with_epsilon(self.epsilon)
            .with_epsilon_decay(self.epsilon_decay)
            .with_min_epsilon(self.min_epsilon);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse a comma-separated action set (e.g. "R,P,S")
pub fn parse_actions(s: &str) -> Result<Vec<Move>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Move>()
                .with_context(|| format!("Invalid action set '{s}'"))
        })
        .collect()
}
