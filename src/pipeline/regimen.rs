//! Training curriculum support
//!
//! A curriculum is a sequence of blocks, each a number of rounds against one
//! built-in opponent. The learner's table carries over between blocks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, opponents::OpponentKind};

/// A single block of training against a specific opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingBlock {
    /// Opponent for this block
    pub opponent: OpponentKind,
    /// Number of rounds to play in this block
    pub rounds: usize,
}

impl TrainingBlock {
    pub fn new(opponent: OpponentKind, rounds: usize) -> Self {
        Self { opponent, rounds }
    }
}

impl FromStr for TrainingBlock {
    type Err = Error;

    /// Parse `opponent:rounds`, e.g. `markov:500`
    fn from_str(s: &str) -> Result<Self> {
        let (opponent, rounds) =
            s.trim()
                .split_once(':')
                .ok_or_else(|| Error::ParseTrainingBlock {
                    input: s.to_string(),
                    reason: "expected opponent:rounds".to_string(),
                })?;
        let rounds = rounds
            .trim()
            .parse::<usize>()
            .map_err(|e| Error::ParseTrainingBlock {
                input: s.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(opponent.parse()?, rounds))
    }
}

/// Parse a comma-separated curriculum, e.g. `cycle:1000,markov:1000`
pub fn parse_schedule(s: &str) -> Result<Vec<TrainingBlock>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(TrainingBlock::from_str)
        .collect()
}

/// Total rounds across a schedule
pub fn total_rounds(schedule: &[TrainingBlock]) -> usize {
    schedule.iter().map(|block| block.rounds).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rps::Move;

    #[test]
    fn test_parse_schedule() {
        let schedule = parse_schedule("cycle:100, rock:20,markov:5").unwrap();
        assert_eq!(
            schedule,
            vec![
                TrainingBlock::new(OpponentKind::Cycle, 100),
                TrainingBlock::new(OpponentKind::Constant(Move::Rock), 20),
                TrainingBlock::new(OpponentKind::Markov, 5),
            ]
        );
        assert_eq!(total_rounds(&schedule), 125);
    }

    #[test]
    fn test_parse_block_errors() {
        assert!(matches!(
            "markov".parse::<TrainingBlock>(),
            Err(Error::ParseTrainingBlock { .. })
        ));
        assert!(matches!(
            "markov:many".parse::<TrainingBlock>(),
            Err(Error::ParseTrainingBlock { .. })
        ));
        assert!(matches!(
            "lizard:10".parse::<TrainingBlock>(),
            Err(Error::ParseOpponent { .. })
        ));
    }
}
