//! Rock-Paper-Scissors game model

pub mod moves;
pub mod state;

pub use moves::{Move, RoundOutcome, determine_reward};
pub use state::{State, StateIndex};
