//! Single-lag state representation and its dense index

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use super::moves::Move;

/// Markov state: the agent's previous move paired with the opponent's
/// previous move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub own: Move,
    pub opponent: Move,
}

impl State {
    pub fn new(own: Move, opponent: Move) -> Self {
        Self { own, opponent }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.own, self.opponent)
    }
}

/// Immutable mapping from states and actions to dense table indices
///
/// States are enumerated as the Cartesian product of the action set with
/// itself, own move major: with `[R, P, S]` that is `RR, RP, RS, PR, ...`.
#[derive(Debug, Clone)]
pub struct StateIndex {
    actions: Vec<Move>,
    states: Vec<State>,
    state_ids: HashMap<State, usize>,
}

impl StateIndex {
    /// Build the index for an action set. The caller guarantees the set is
    /// non-empty and free of duplicates.
    pub fn new(actions: &[Move]) -> Self {
        let states: Vec<State> = actions
            .iter()
            .flat_map(|&own| actions.iter().map(move |&opponent| State::new(own, opponent)))
            .collect();
        let state_ids = states
            .iter()
            .enumerate()
            .map(|(idx, &state)| (state, idx))
            .collect();

        Self {
            actions: actions.to_vec(),
            states,
            state_ids,
        }
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> &[Move] {
        &self.actions
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Row index for a state, if the state belongs to the state space
    pub fn state_id(&self, state: &State) -> Option<usize> {
        self.state_ids.get(state).copied()
    }

    /// Column index for an action, if it belongs to the action set
    pub fn action_id(&self, action: Move) -> Option<usize> {
        self.actions.iter().position(|&a| a == action)
    }

    pub fn contains(&self, state: &State) -> bool {
        self.state_ids.contains_key(state)
    }
}
