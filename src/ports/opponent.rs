//! Opponent port - the external move generator the learner plays against

use crate::{Result, rps::Move};

/// Opponent trait - produces one move per round
///
/// An opponent sees only the agent's previous move (`None` on the first
/// call of an episode) and answers with its own move. Returning `None` is
/// the "unknown move" sentinel, which the learner answers with a random
/// opening move.
///
/// # Examples
///
/// ```
/// use rps_qlearning::{ports::Opponent, rps::Move};
///
/// struct Mirror;
///
/// impl Opponent for Mirror {
///     fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move> {
///         agent_previous.or(Some(Move::Rock))
///     }
///
///     fn name(&self) -> &str {
///         "mirror"
///     }
/// }
/// ```
pub trait Opponent: Send {
    /// Produce this round's move given the agent's previous move.
    fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move>;

    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Forget any accumulated history.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for memoryless opponents.
    fn reset(&mut self) {}

    /// Seed the opponent's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

/// Adapter turning a closure into an [`Opponent`]
pub struct FnOpponent<F> {
    name: String,
    respond: F,
}

impl<F> FnOpponent<F>
where
    F: FnMut(Option<Move>) -> Option<Move> + Send,
{
    pub fn new(name: impl Into<String>, respond: F) -> Self {
        Self {
            name: name.into(),
            respond,
        }
    }
}

impl<F> Opponent for FnOpponent<F>
where
    F: FnMut(Option<Move>) -> Option<Move> + Send,
{
    fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move> {
        (self.respond)(agent_previous)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
