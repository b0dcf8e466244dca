//! Ports (trait boundaries) for external collaborators.
//!
//! The learner itself is a concrete type; what varies is who it plays
//! against and who watches. Both are defined here and implemented by
//! adapters in [`crate::opponents`] and [`crate::pipeline::observers`].

pub mod observer;
pub mod opponent;

pub use observer::{Observer, RoundRecord};
pub use opponent::{FnOpponent, Opponent};
