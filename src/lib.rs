//! Tabular Q-learning agent for repeated Rock-Paper-Scissors
//!
//! This crate provides:
//! - Move and reward rules of the game
//! - A single-lag tabular Q-learner with ε-greedy exploration
//! - Built-in history-based opponents
//! - Training, curriculum and evaluation pipelines with pluggable observers
//! - CSV/JSONL export and a command-line interface

pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod opponents;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod rps;

pub use error::{Error, Result};
pub use opponents::OpponentKind;
pub use q_learning::{LearnerConfig, ResetMode, TabularQLearner};
pub use rps::{Move, RoundOutcome, State, determine_reward};
