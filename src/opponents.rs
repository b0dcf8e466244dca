//! Built-in history-based opponents
//!
//! Each opponent only looks at the agent's past moves. They range from
//! memoryless (constant, cycle, random) to a first-order Markov predictor.

use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ports::Opponent, rps::Move};

/// Always plays the same move
pub struct ConstantOpponent {
    name: String,
    play: Move,
}

impl ConstantOpponent {
    pub fn new(play: Move) -> Self {
        Self {
            name: format!("constant-{}", play.to_char().to_ascii_lowercase()),
            play,
        }
    }
}

impl Opponent for ConstantOpponent {
    fn respond(&mut self, _agent_previous: Option<Move>) -> Option<Move> {
        Some(self.play)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cycles through a fixed pattern regardless of the agent
pub struct CycleOpponent {
    pattern: Vec<Move>,
    position: usize,
}

impl CycleOpponent {
    /// Default pattern R, R, P, P, S
    pub const DEFAULT_PATTERN: [Move; 5] =
        [Move::Rock, Move::Rock, Move::Paper, Move::Paper, Move::Scissors];

    pub fn new(pattern: Vec<Move>) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::config("cycle pattern must not be empty"));
        }
        Ok(Self {
            pattern,
            position: 0,
        })
    }
}

impl Default for CycleOpponent {
    fn default() -> Self {
        Self {
            pattern: Self::DEFAULT_PATTERN.to_vec(),
            position: 0,
        }
    }
}

impl Opponent for CycleOpponent {
    fn respond(&mut self, _agent_previous: Option<Move>) -> Option<Move> {
        let play = self.pattern[self.position % self.pattern.len()];
        self.position += 1;
        Some(play)
    }

    fn name(&self) -> &str {
        "cycle"
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

/// Plays whatever beats the agent's previous move
///
/// Before the agent has moved it assumes Rock, so it opens with Paper.
#[derive(Default)]
pub struct CounterLastOpponent;

impl Opponent for CounterLastOpponent {
    fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move> {
        Some(agent_previous.unwrap_or(Move::Rock).counter())
    }

    fn name(&self) -> &str {
        "counter-last"
    }
}

/// Counters the agent's most frequent move within a sliding window
pub struct FrequencyOpponent {
    window: usize,
    recent: VecDeque<Move>,
}

impl FrequencyOpponent {
    pub const DEFAULT_WINDOW: usize = 10;

    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            recent: VecDeque::new(),
        }
    }

    /// Most frequent move in the window; ties go to canonical order and an
    /// empty window assumes Scissors.
    fn predicted(&self) -> Move {
        let mut counts = [0usize; 3];
        for &mv in &self.recent {
            counts[mv as usize] += 1;
        }
        if counts.iter().all(|&count| count == 0) {
            return Move::Scissors;
        }
        let mut best = Move::Rock;
        for mv in Move::ALL {
            if counts[mv as usize] > counts[best as usize] {
                best = mv;
            }
        }
        best
    }
}

impl Default for FrequencyOpponent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl Opponent for FrequencyOpponent {
    fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move> {
        if let Some(mv) = agent_previous {
            self.recent.push_back(mv);
            while self.recent.len() > self.window {
                self.recent.pop_front();
            }
        }
        Some(self.predicted().counter())
    }

    fn name(&self) -> &str {
        "frequency"
    }

    fn reset(&mut self) {
        self.recent.clear();
    }
}

/// First-order Markov predictor over the agent's consecutive moves
///
/// Counts transitions `previous -> next` in the agent's history, predicts
/// the most frequent successor of the agent's latest move and plays its
/// counter. A missing move records no transition and is predicted as if
/// the agent had played Rock.
#[derive(Default)]
pub struct MarkovOpponent {
    transitions: [[u32; 3]; 3],
    last: Option<Move>,
}

impl MarkovOpponent {
    fn predicted_after(&self, mv: Move) -> Move {
        let row = &self.transitions[mv as usize];
        let mut best = Move::Rock;
        for candidate in Move::ALL {
            if row[candidate as usize] > row[best as usize] {
                best = candidate;
            }
        }
        best
    }
}

impl Opponent for MarkovOpponent {
    fn respond(&mut self, agent_previous: Option<Move>) -> Option<Move> {
        if let (Some(last), Some(current)) = (self.last, agent_previous) {
            self.transitions[last as usize][current as usize] += 1;
        }
        self.last = agent_previous;
        Some(self.predicted_after(agent_previous.unwrap_or(Move::Rock)).counter())
    }

    fn name(&self) -> &str {
        "markov"
    }

    fn reset(&mut self) {
        self.transitions = [[0; 3]; 3];
        self.last = None;
    }
}

/// Uniformly random opponent (baseline)
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a random opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn respond(&mut self, _agent_previous: Option<Move>) -> Option<Move> {
        Some(Move::ALL[self.rng.random_range(0..Move::ALL.len())])
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Selectable built-in opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Constant(Move),
    Cycle,
    CounterLast,
    Frequency,
    Markov,
    Random,
}

impl OpponentKind {
    /// Every built-in opponent, in report order
    pub const ALL: [OpponentKind; 8] = [
        OpponentKind::Constant(Move::Rock),
        OpponentKind::Constant(Move::Paper),
        OpponentKind::Constant(Move::Scissors),
        OpponentKind::Cycle,
        OpponentKind::CounterLast,
        OpponentKind::Frequency,
        OpponentKind::Markov,
        OpponentKind::Random,
    ];

    const EXPECTED: &'static str = "rock, paper, scissors, cycle, counter, frequency, markov, random";

    /// Short label, accepted back by `FromStr`
    pub fn label(&self) -> &'static str {
        match self {
            OpponentKind::Constant(Move::Rock) => "rock",
            OpponentKind::Constant(Move::Paper) => "paper",
            OpponentKind::Constant(Move::Scissors) => "scissors",
            OpponentKind::Cycle => "cycle",
            OpponentKind::CounterLast => "counter",
            OpponentKind::Frequency => "frequency",
            OpponentKind::Markov => "markov",
            OpponentKind::Random => "random",
        }
    }

    pub fn build(&self) -> Box<dyn Opponent> {
        match self {
            OpponentKind::Constant(play) => Box::new(ConstantOpponent::new(*play)),
            OpponentKind::Cycle => Box::new(CycleOpponent::default()),
            OpponentKind::CounterLast => Box::new(CounterLastOpponent),
            OpponentKind::Frequency => Box::new(FrequencyOpponent::default()),
            OpponentKind::Markov => Box::new(MarkovOpponent::default()),
            OpponentKind::Random => Box::new(RandomOpponent::new()),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OpponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(OpponentKind::Constant(Move::Rock)),
            "paper" | "p" => Ok(OpponentKind::Constant(Move::Paper)),
            "scissors" | "s" => Ok(OpponentKind::Constant(Move::Scissors)),
            "cycle" => Ok(OpponentKind::Cycle),
            "counter" | "counter-last" => Ok(OpponentKind::CounterLast),
            "frequency" => Ok(OpponentKind::Frequency),
            "markov" => Ok(OpponentKind::Markov),
            "random" => Ok(OpponentKind::Random),
            other => Err(Error::ParseOpponent {
                input: other.to_string(),
                expected: Self::EXPECTED.to_string(),
            }),
        }
    }
}
