//! Tabular Q-learning
//!
//! One-step Q-learning over a dense table indexed by the single-lag state
//! (agent's previous move, opponent's previous move):
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! Action selection is ε-greedy with ε decaying exponentially in the step
//! count toward a floor.
//!
//! ## Usage Example
//!
//! ```
//! use rps_qlearning::{
//!     q_learning::{LearnerConfig, TabularQLearner},
//!     rps::Move,
//! };
//!
//! let mut learner = TabularQLearner::new(LearnerConfig::default().with_seed(1)).unwrap();
//!
//! // First round: no opponent move known yet.
//! let _opening = learner.play_round(None).unwrap();
//! // Later rounds receive the opponent's previous move.
//! let _next = learner.play_round(Some(Move::Rock)).unwrap();
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

// Public re-exports
pub use agent::{ResetMode, TabularQLearner};
pub use config::LearnerConfig;
pub use q_table::QTable;
