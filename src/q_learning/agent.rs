//! Tabular Q-learning agent for Rock-Paper-Scissors
//!
//! The agent plays one move per call of [`TabularQLearner::play_round`]. The
//! reward for a move is only known once the opponent's answer arrives, so
//! every update lags one round behind the transition it credits.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Error, Result,
    ports::Opponent,
    q_learning::{config::LearnerConfig, q_table::QTable},
    rps::{Move, State, StateIndex, determine_reward},
};

/// What [`TabularQLearner::reset`] clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    /// Clear step count and move history, keep the learned table.
    /// Used between evaluation episodes.
    HistoryOnly,
    /// Zero the table and forget the last state. Restarts learning.
    Full,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent over the (own previous move, opponent previous move)
/// state space
#[derive(Debug, Clone)]
pub struct TabularQLearner {
    config: LearnerConfig,
    index: StateIndex,
    q_table: QTable,
    epsilon: f64,
    step: u64,
    last_action: Option<Move>,
    last_state: Option<State>,
    history: Vec<Move>,
    rng: StdRng,
}

impl TabularQLearner {
    /// Create a new learner
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any parameter is out of
    /// range or the action set is empty or repeats a move.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;

        let index = StateIndex::new(&config.actions);
        let q_table = QTable::new(
            index.num_states(),
            index.num_actions(),
            config.learning_rate,
            config.discount_factor,
        );

        Ok(Self {
            epsilon: config.epsilon,
            rng: build_rng(config.seed),
            index,
            q_table,
            step: 0,
            last_action: None,
            last_state: None,
            history: Vec::new(),
            config,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn actions(&self) -> &[Move] {
        self.index.actions()
    }

    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override the current exploration rate, e.g. to freeze the policy
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::config(format!("epsilon {epsilon} must be in [0, 1]")));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn last_action(&self) -> Option<Move> {
        self.last_action
    }

    pub fn last_state(&self) -> Option<State> {
        self.last_state
    }

    /// Every action emitted since the last reset
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Q-value for a state-action pair
    pub fn q_value(&self, state: &State, action: Move) -> Result<f64> {
        let (state_id, action_id) = self.resolve(state, action)?;
        Ok(self.q_table.get(state_id, action_id))
    }

    /// Overwrite a Q-value, e.g. to warm-start the table
    pub fn set_q_value(&mut self, state: &State, action: Move, value: f64) -> Result<()> {
        let (state_id, action_id) = self.resolve(state, action)?;
        self.q_table.set(state_id, action_id, value);
        Ok(())
    }

    /// Greedy action for every state, in state-index order
    pub fn greedy_policy(&self) -> Vec<(State, Move)> {
        self.index
            .states()
            .iter()
            .enumerate()
            .map(|(state_id, &state)| {
                (state, self.index.actions()[self.q_table.greedy_action(state_id)])
            })
            .collect()
    }

    /// ε-greedy action selection
    ///
    /// With probability ε a uniformly random action is returned without
    /// consulting the table. Otherwise the greedy action of the state's row,
    /// ties going to the earliest action in the action set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] when exploiting a state outside the
    /// state space.
    pub fn select_action(&mut self, state: &State) -> Result<Move> {
        if self.rng.random::<f64>() < self.epsilon {
            return Ok(self.random_action());
        }

        let state_id = self
            .index
            .state_id(state)
            .ok_or(Error::UnknownState { state: *state })?;
        Ok(self.index.actions()[self.q_table.greedy_action(state_id)])
    }

    /// Credit the previous transition now that the opponent's answer is known
    ///
    /// The reward is computed from `prev_action` against
    /// `observed_opponent_move` and backed up into `Q[prev_state][prev_action]`
    /// using the best value of `new_state`. Returns the reward applied.
    pub fn record_outcome_and_update(
        &mut self,
        prev_state: &State,
        prev_action: Move,
        observed_opponent_move: Move,
        new_state: &State,
    ) -> Result<f64> {
        let (state_id, action_id) = self.resolve(prev_state, prev_action)?;
        let next_id = self
            .index
            .state_id(new_state)
            .ok_or(Error::UnknownState { state: *new_state })?;

        let reward = determine_reward(prev_action, observed_opponent_move);
        let new_q = self
            .q_table
            .q_learning_update(state_id, action_id, reward, next_id);

        debug!(
            step = self.step,
            state = %prev_state,
            action = %prev_action,
            next_state = %new_state,
            reward,
            q = new_q,
            "q-value updated"
        );
        Ok(reward)
    }

    /// Exponential decay toward the floor: ε ← max(floor, ε·exp(-λ·step))
    pub fn advance_epsilon(&mut self) {
        let decayed = self.epsilon * (-self.config.epsilon_decay * self.step as f64).exp();
        self.epsilon = decayed.max(self.config.min_epsilon);
    }

    /// Play one round given the opponent's previous move
    ///
    /// The first round of an episode (no action played yet, or the opponent
    /// move is the `None` sentinel) is a uniform random move that touches
    /// neither the table nor ε. The last state survives the sentinel, so the
    /// next round credits it with the opening move's reward. Every later round builds the state
    /// `(last action, opponent move)`, picks an action, credits the previous
    /// transition with the reward of `last action` against `opponent move`,
    /// and decays ε.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the opponent plays a move outside
    /// the action set. The learner is left unchanged in that case.
    pub fn play_round(&mut self, opponent_previous: Option<Move>) -> Result<Move> {
        let (Some(last_action), Some(opponent_move)) = (self.last_action, opponent_previous)
        else {
            return Ok(self.open_episode());
        };

        let state = State::new(last_action, opponent_move);
        if !self.index.contains(&state) {
            return Err(Error::UnknownState { state });
        }

        let action = self.select_action(&state)?;
        self.step += 1;

        if let Some(last_state) = self.last_state {
            self.record_outcome_and_update(&last_state, last_action, opponent_move, &state)?;
        }

        self.last_action = Some(action);
        self.last_state = Some(state);
        self.history.push(action);
        self.advance_epsilon();

        trace!(step = self.step, state = %state, action = %action, epsilon = self.epsilon, "round played");
        Ok(action)
    }

    /// Loop [`play_round`](Self::play_round) against an opponent that sees
    /// the agent's previous action. Returns the actions played.
    pub fn train(&mut self, opponent: &mut dyn Opponent, num_episodes: usize) -> Result<Vec<Move>> {
        let mut played = Vec::with_capacity(num_episodes);
        for _ in 0..num_episodes {
            let opponent_move = opponent.respond(self.last_action);
            played.push(self.play_round(opponent_move)?);
        }
        debug!(
            opponent = opponent.name(),
            rounds = num_episodes,
            step = self.step,
            epsilon = self.epsilon,
            "training episodes finished"
        );
        Ok(played)
    }

    pub fn reset(&mut self, mode: ResetMode) {
        match mode {
            ResetMode::HistoryOnly => {
                self.epsilon = self.config.history_reset_epsilon;
            }
            ResetMode::Full => {
                self.q_table.reset();
                self.last_state = None;
                self.epsilon = self.config.full_reset_epsilon;
            }
        }
        self.history.clear();
        self.step = 0;
        debug!(?mode, epsilon = self.epsilon, "learner reset");
    }

    fn open_episode(&mut self) -> Move {
        let action = self.random_action();
        self.last_action = Some(action);
        self.history.push(action);
        self.step += 1;
        action
    }

    fn random_action(&mut self) -> Move {
        let actions = self.index.actions();
        actions[self.rng.random_range(0..actions.len())]
    }

    fn resolve(&self, state: &State, action: Move) -> Result<(usize, usize)> {
        let state_id = self
            .index
            .state_id(state)
            .ok_or(Error::UnknownState { state: *state })?;
        let action_id = self
            .index
            .action_id(action)
            .ok_or(Error::UnknownAction { action })?;
        Ok((state_id, action_id))
    }
}
