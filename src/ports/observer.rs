//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing rounds, allowing composable
//! data collection without coupling the training loop to output formats.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    rps::{Move, RoundOutcome},
};

/// Everything observable about one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Global round number (0-based, continues across curriculum blocks)
    pub round: usize,
    /// Name of the opponent played in this round
    pub opponent: String,
    /// Move the agent emitted this round
    pub agent_move: Move,
    /// Move the opponent supplied this round (`None` for the sentinel)
    pub opponent_move: Option<Move>,
    /// Outcome credited this round, if a scored pair existed
    pub outcome: Option<RoundOutcome>,
    /// Exploration rate after the round
    pub epsilon: f64,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_rounds)` - once
/// 2. `on_round(record)` - once per round
/// 3. `on_training_end()` - once
///
/// # Examples
///
/// ```no_run
/// use rps_qlearning::ports::{Observer, RoundRecord};
///
/// struct Counter {
///     rounds: usize,
/// }
///
/// impl Observer for Counter {
///     fn on_round(&mut self, _record: &RoundRecord) -> rps_qlearning::Result<()> {
///         self.rounds += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_rounds: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every round.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_round(&mut self, _record: &RoundRecord) -> Result<()> {
        Ok(())
    }

    /// Called when training completes. Use it to flush outputs.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
