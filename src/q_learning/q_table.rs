//! Dense Q-table for the single-lag state space

use serde::{Deserialize, Serialize};

/// Q-table stored row-major as `[num_states][num_actions]`
///
/// Rows and columns are addressed by the dense ids handed out by
/// [`StateIndex`](crate::rps::StateIndex). The shape is fixed at construction
/// and survives [`QTable::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialised Q-table
    pub fn new(
        num_states: usize,
        num_actions: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
            learning_rate,
            discount_factor,
        }
    }

    /// `(num_states, num_actions)`
    pub fn shape(&self) -> (usize, usize) {
        (self.num_states, self.num_actions)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.offset(state, action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let offset = self.offset(state, action);
        self.values[offset] = value;
    }

    /// All action values of one state
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    /// Maximum Q-value in a state
    pub fn max_q(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Column of the greedy action; ties go to the lowest column
    pub fn greedy_action(&self, state: usize) -> usize {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (action, &value) in self.row(state).iter().enumerate() {
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the new value of Q(s,a).
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
    ) -> f64 {
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * self.max_q(next_state);
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Zero every value, keeping the shape
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|value| *value = 0.0);
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&value| value == 0.0)
    }

    fn offset(&self, state: usize, action: usize) -> usize {
        debug_assert!(state < self.num_states, "state id {state} out of range");
        debug_assert!(action < self.num_actions, "action id {action} out of range");
        state * self.num_actions + action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(9, 3, 0.25, 0.8);
        assert_eq!(qtable.shape(), (9, 3));
        for state in 0..9 {
            for action in 0..3 {
                assert_eq!(qtable.get(state, action), 0.0);
            }
        }
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        qtable.set(4, 2, 1.5);
        assert_eq!(qtable.get(4, 2), 1.5);
        assert_eq!(qtable.row(4), &[0.0, 0.0, 1.5]);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        qtable.set(0, 0, 0.5);
        qtable.set(0, 1, 1.5);
        qtable.set(0, 2, 0.8);
        assert_eq!(qtable.max_q(0), 1.5);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        qtable.set(0, 0, 0.5);
        qtable.set(0, 1, 1.5);
        qtable.set(0, 2, 0.8);
        assert_eq!(qtable.greedy_action(0), 1);
    }

    #[test]
    fn test_greedy_action_prefers_first_on_ties() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        assert_eq!(qtable.greedy_action(3), 0);

        qtable.set(3, 1, 2.0);
        qtable.set(3, 2, 2.0);
        assert_eq!(qtable.greedy_action(3), 1);
    }

    #[test]
    fn test_greedy_action_all_negative() {
        let mut qtable = QTable::new(1, 3, 0.25, 0.8);
        qtable.set(0, 0, -3.0);
        qtable.set(0, 1, -1.0);
        qtable.set(0, 2, -2.0);
        assert_eq!(qtable.greedy_action(0), 1);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(9, 3, 0.5, 0.99);
        qtable.set(5, 1, 1.0);
        qtable.set(5, 2, 2.0);

        // Q(s,0) = 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0) = 0.99
        let updated_q = qtable.q_learning_update(0, 0, 0.0, 5);
        assert!((updated_q - 0.99).abs() < 1e-12);
        assert!((qtable.get(0, 0) - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_update_with_reward_only() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        qtable.q_learning_update(2, 1, 1.0, 7);
        assert!((qtable.get(2, 1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_update_touches_single_cell() {
        let mut qtable = QTable::new(9, 3, 0.25, 0.8);
        qtable.q_learning_update(4, 2, -1.0, 4);
        let nonzero = (0..9)
            .flat_map(|s| (0..3).map(move |a| (s, a)))
            .filter(|&(s, a)| qtable.get(s, a) != 0.0)
            .collect::<Vec<_>>();
        assert_eq!(nonzero, vec![(4, 2)]);
    }

    #[test]
    fn test_fixed_point_is_stable() {
        let mut qtable = QTable::new(9, 3, 0.25, 1.0);
        qtable.set(0, 1, 0.7);
        qtable.set(6, 2, 0.7);
        let before = qtable.clone();

        qtable.q_learning_update(0, 1, 0.0, 6);
        qtable.q_learning_update(0, 1, 0.0, 6);
        assert_eq!(qtable, before);
    }

    #[test]
    fn test_reset_keeps_shape() {
        let mut qtable = QTable::new(4, 2, 0.25, 0.8);
        qtable.set(3, 1, 9.0);
        qtable.reset();
        assert_eq!(qtable.shape(), (4, 2));
        assert!(qtable.is_zero());
    }
}
