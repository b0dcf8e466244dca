//! Moves, the beats-relation and round outcomes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A playable move
///
/// The declaration order (Rock, Paper, Scissors) is the canonical order used
/// for the default action set and for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "R")]
    Rock,
    #[serde(rename = "P")]
    Paper,
    #[serde(rename = "S")]
    Scissors,
}

impl Move {
    /// All moves in canonical order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Whether `self` beats `other`
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }

    /// The move that beats `self`
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Move::Rock => 'R',
            Move::Paper => 'P',
            Move::Scissors => 'S',
        }
    }

    /// Parse a play coming from a driver, where the empty string is the
    /// "no previous move" sentinel.
    pub fn parse_play(input: &str) -> Result<Option<Move>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Move::Rock),
            "p" | "paper" => Ok(Move::Paper),
            "s" | "scissors" => Ok(Move::Scissors),
            _ => Err(Error::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}

/// Result of a single round from the agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Win,
    Draw,
    Loss,
}

impl RoundOutcome {
    /// Score `agent` against `opponent`
    pub fn of(agent: Move, opponent: Move) -> Self {
        if agent.beats(opponent) {
            RoundOutcome::Win
        } else if agent == opponent {
            RoundOutcome::Draw
        } else {
            RoundOutcome::Loss
        }
    }

    /// Reward signal: +1 win, 0 draw, -1 loss
    pub fn reward(self) -> f64 {
        match self {
            RoundOutcome::Win => 1.0,
            RoundOutcome::Draw => 0.0,
            RoundOutcome::Loss => -1.0,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoundOutcome::Win => "win",
            RoundOutcome::Draw => "draw",
            RoundOutcome::Loss => "loss",
        };
        f.write_str(label)
    }
}

/// Reward for the agent playing `agent_action` against `opponent_action`
pub fn determine_reward(agent_action: Move, opponent_action: Move) -> f64 {
    RoundOutcome::of(agent_action, opponent_action).reward()
}
