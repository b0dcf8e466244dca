//! Training and evaluation pipeline
//!
//! This module provides:
//! - Training a learner against one opponent or a curriculum of opponents
//! - Evaluating the learned table in a simultaneous match
//! - Observers recording what happens each round

pub mod observers;
pub mod regimen;
pub mod training;

pub use observers::{JsonlObserver, LogObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use regimen::{TrainingBlock, parse_schedule, total_rounds};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Observer, Opponent, RoundRecord};
