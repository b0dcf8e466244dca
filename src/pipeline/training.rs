//! Training pipeline for the tabular learner

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::regimen::{TrainingBlock, total_rounds};
use crate::{
    Result,
    ports::{Observer, Opponent, RoundRecord},
    q_learning::{ResetMode, TabularQLearner},
    rps::RoundOutcome,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training rounds for [`TrainingPipeline::run`]
    pub rounds: usize,

    /// Random seed for learner and opponents
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            seed: None,
        }
    }
}

/// Result of a training or evaluation run
///
/// Rates are relative to the scored rounds (`wins + draws + losses`); the
/// opening round of every block has nothing to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total rounds played
    pub total_rounds: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Exploration rate when the run ended
    pub final_epsilon: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        total_rounds: usize,
        wins: usize,
        draws: usize,
        losses: usize,
        final_epsilon: f64,
    ) -> Self {
        let scored = wins + draws + losses;
        let rate = |count: usize| {
            if scored > 0 {
                count as f64 / scored as f64
            } else {
                0.0
            }
        };

        Self {
            total_rounds,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            final_epsilon,
        }
    }

    pub fn scored_rounds(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// Wins minus losses
    pub fn net_score(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

#[derive(Debug, Default)]
struct Tally {
    rounds: usize,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, outcome: Option<RoundOutcome>) {
        self.rounds += 1;
        match outcome {
            Some(RoundOutcome::Win) => self.wins += 1,
            Some(RoundOutcome::Draw) => self.draws += 1,
            Some(RoundOutcome::Loss) => self.losses += 1,
            None => {}
        }
    }

    fn finish(&self, final_epsilon: f64) -> TrainingResult {
        TrainingResult::new(
            self.rounds,
            self.wins,
            self.draws,
            self.losses,
            final_epsilon,
        )
    }
}

/// Drives a learner against opponents and reports to observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Train against a single opponent for `config.rounds` rounds
    ///
    /// Each round the opponent answers the learner's previous action and the
    /// learner plays on that answer. The round is scored as the learner's
    /// previous action against the answer, the same pairing its reward uses.
    /// The first round passes the empty sentinel to start a fresh episode.
    pub fn run(
        &mut self,
        learner: &mut TabularQLearner,
        opponent: &mut dyn Opponent,
    ) -> Result<TrainingResult> {
        self.seed_pair(learner, opponent, 0)?;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.rounds)?;
        }

        let mut tally = Tally::default();
        self.train_block(learner, opponent, self.config.rounds, &mut tally)?;

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = tally.finish(learner.epsilon());
        info!(
            opponent = opponent.name(),
            rounds = result.total_rounds,
            win_rate = result.win_rate,
            epsilon = result.final_epsilon,
            "training finished"
        );
        Ok(result)
    }

    /// Run a curriculum of sequential blocks
    ///
    /// The learner keeps its table across blocks; each block starts a new
    /// episode against a freshly built opponent.
    pub fn run_curriculum(
        &mut self,
        learner: &mut TabularQLearner,
        schedule: &[TrainingBlock],
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed);
        }

        let all_rounds = total_rounds(schedule);
        for observer in &mut self.observers {
            observer.on_training_start(all_rounds)?;
        }

        let mut tally = Tally::default();
        for (block_idx, block) in schedule.iter().enumerate() {
            if block.rounds == 0 {
                continue;
            }

            let mut opponent = block.opponent.build();
            if let Some(seed) = self.config.seed {
                opponent.set_rng_seed(seed.wrapping_add(block_idx as u64 + 1))?;
            }

            info!(
                block = block_idx + 1,
                opponent = %block.opponent,
                rounds = block.rounds,
                "starting curriculum block"
            );
            self.train_block(learner, opponent.as_mut(), block.rounds, &mut tally)?;
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = tally.finish(learner.epsilon());
        info!(
            blocks = schedule.len(),
            rounds = result.total_rounds,
            win_rate = result.win_rate,
            epsilon = result.final_epsilon,
            "curriculum finished"
        );
        Ok(result)
    }

    /// Evaluate the learned table in a simultaneous match
    ///
    /// The learner gets a history-only reset first, keeping its table. Each
    /// round both sides answer the other's previous move and the two moves
    /// are scored against each other. The learner keeps updating its table
    /// as it plays.
    pub fn evaluate(
        &mut self,
        learner: &mut TabularQLearner,
        opponent: &mut dyn Opponent,
        rounds: usize,
    ) -> Result<TrainingResult> {
        learner.reset(ResetMode::HistoryOnly);
        opponent.reset();
        if let Some(seed) = self.config.seed {
            opponent.set_rng_seed(seed.wrapping_add(1_000))?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(rounds)?;
        }

        let mut tally = Tally::default();
        let mut agent_previous = None;
        let mut opponent_previous = None;
        for round in 0..rounds {
            let agent_move = learner.play_round(opponent_previous)?;
            let opponent_move = opponent.respond(agent_previous);
            let outcome = opponent_move.map(|theirs| RoundOutcome::of(agent_move, theirs));

            tally.record(outcome);
            self.notify(RoundRecord {
                round,
                opponent: opponent.name().to_string(),
                agent_move,
                opponent_move,
                outcome,
                epsilon: learner.epsilon(),
            })?;

            agent_previous = Some(agent_move);
            opponent_previous = opponent_move;
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = tally.finish(learner.epsilon());
        info!(
            opponent = opponent.name(),
            rounds = result.total_rounds,
            win_rate = result.win_rate,
            "evaluation finished"
        );
        Ok(result)
    }

    fn train_block(
        &mut self,
        learner: &mut TabularQLearner,
        opponent: &mut dyn Opponent,
        rounds: usize,
        tally: &mut Tally,
    ) -> Result<()> {
        opponent.reset();
        for block_round in 0..rounds {
            let opponent_move = if block_round == 0 {
                None
            } else {
                opponent.respond(learner.last_action())
            };
            let outcome = match (learner.last_action(), opponent_move) {
                (Some(ours), Some(theirs)) => Some(RoundOutcome::of(ours, theirs)),
                _ => None,
            };

            let agent_move = learner.play_round(opponent_move)?;

            let round = tally.rounds;
            tally.record(outcome);
            self.notify(RoundRecord {
                round,
                opponent: opponent.name().to_string(),
                agent_move,
                opponent_move,
                outcome,
                epsilon: learner.epsilon(),
            })?;
        }
        debug!(opponent = opponent.name(), rounds, "block finished");
        Ok(())
    }

    fn notify(&mut self, record: RoundRecord) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_round(&record)?;
        }
        Ok(())
    }

    fn seed_pair(
        &self,
        learner: &mut TabularQLearner,
        opponent: &mut dyn Opponent,
        offset: u64,
    ) -> Result<()> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed.wrapping_add(offset));
            opponent.set_rng_seed(seed.wrapping_add(offset + 1))?;
        }
        Ok(())
    }
}
