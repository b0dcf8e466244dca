//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    ports::{Observer, RoundRecord},
    rps::RoundOutcome,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_rounds: usize) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        match record.outcome {
            Some(RoundOutcome::Win) => self.wins += 1,
            Some(RoundOutcome::Draw) => self.draws += 1,
            Some(RoundOutcome::Loss) => self.losses += 1,
            None => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            if record.round.is_multiple_of(100) {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_rounds: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub recent_win_rate: f64,
    pub epsilon: f64,
}

/// Metrics observer - Tracks overall and rolling win rates
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_rounds: usize,
    window: usize,
    recent: VecDeque<RoundOutcome>,
    last_epsilon: f64,
}

impl MetricsObserver {
    pub const DEFAULT_WINDOW: usize = 100;

    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Track the rolling win rate over the last `window` scored rounds
    pub fn with_window(window: usize) -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
            total_rounds: 0,
            window: window.max(1),
            recent: VecDeque::new(),
            last_epsilon: 0.0,
        }
    }

    /// Win rate over all scored rounds
    pub fn win_rate(&self) -> f64 {
        let scored = self.wins + self.draws + self.losses;
        if scored == 0 {
            0.0
        } else {
            self.wins as f64 / scored as f64
        }
    }

    /// Win rate over the rolling window
    pub fn recent_win_rate(&self) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let wins = self
            .recent
            .iter()
            .filter(|&&outcome| outcome == RoundOutcome::Win)
            .count();
        wins as f64 / self.recent.len() as f64
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_rounds: self.total_rounds,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            recent_win_rate: self.recent_win_rate(),
            epsilon: self.last_epsilon,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.total_rounds += 1;
        self.last_epsilon = record.epsilon;

        let Some(outcome) = record.outcome else {
            return Ok(());
        };
        match outcome {
            RoundOutcome::Win => self.wins += 1,
            RoundOutcome::Draw => self.draws += 1,
            RoundOutcome::Loss => self.losses += 1,
        }
        self.recent.push_back(outcome);
        while self.recent.len() > self.window {
            self.recent.pop_front();
        }
        Ok(())
    }
}

/// Logs a progress line through `tracing` every `interval` rounds
pub struct LogObserver {
    interval: usize,
    metrics: MetricsObserver,
}

impl LogObserver {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            metrics: MetricsObserver::with_window(interval.max(1)),
        }
    }
}

impl Observer for LogObserver {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.metrics.on_round(record)?;
        if (record.round + 1).is_multiple_of(self.interval) {
            let summary = self.metrics.summary();
            info!(
                round = record.round + 1,
                opponent = %record.opponent,
                win_rate = summary.win_rate,
                recent_win_rate = summary.recent_win_rate,
                epsilon = record.epsilon,
                "training progress"
            );
        }
        Ok(())
    }
}

/// JSONL observer - one [`RoundRecord`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }
}

impl Observer for JsonlObserver {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rps::Move;

    fn record(round: usize, outcome: Option<RoundOutcome>) -> RoundRecord {
        RoundRecord {
            round,
            opponent: "test".to_string(),
            agent_move: Move::Rock,
            opponent_move: Some(Move::Paper),
            outcome,
            epsilon: 0.5,
        }
    }

    #[test]
    fn test_metrics_counts_scored_rounds() {
        let mut metrics = MetricsObserver::with_window(2);
        metrics.on_round(&record(0, None)).unwrap();
        metrics.on_round(&record(1, Some(RoundOutcome::Loss))).unwrap();
        metrics.on_round(&record(2, Some(RoundOutcome::Win))).unwrap();
        metrics.on_round(&record(3, Some(RoundOutcome::Win))).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.total_rounds, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.recent_win_rate, 1.0);
        assert_eq!(summary.epsilon, 0.5);
    }
}
