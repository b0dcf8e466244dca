//! Hyper-parameters for the tabular learner.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, rps::Move};

/// Configuration for creating a [`TabularQLearner`](super::TabularQLearner).
///
/// Builder-style API; every field has a default matching the classic
/// Rock-Paper-Scissors setup.
///
/// # Examples
///
/// ```
/// use rps_qlearning::q_learning::LearnerConfig;
///
/// let config = LearnerConfig::default()
///     .with_learning_rate(0.3)
///     .with_discount_factor(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Ordered action set; order indexes table columns and breaks ties
    pub actions: Vec<Move>,
    /// Learning rate α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in [0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate ε₀ in [0, 1]
    pub epsilon: f64,
    /// Exponential decay rate λ applied as ε·exp(-λ·step)
    pub epsilon_decay: f64,
    /// Exploration floor
    pub min_epsilon: f64,
    /// Exploration rate restored by a history-only reset
    pub history_reset_epsilon: f64,
    /// Exploration rate restored by a full reset
    pub full_reset_epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            actions: Move::ALL.to_vec(),
            learning_rate: 0.25,
            discount_factor: 0.8,
            epsilon: 1.0,
            epsilon_decay: 1e-4,
            min_epsilon: 0.01,
            history_reset_epsilon: 0.1,
            full_reset_epsilon: 0.9,
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn with_actions(mut self, actions: Vec<Move>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_reset_epsilons(mut self, history_only: f64, full: f64) -> Self {
        self.history_reset_epsilon = history_only;
        self.full_reset_epsilon = full;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(Error::config("action set must not be empty"));
        }
        for (idx, action) in self.actions.iter().enumerate() {
            if self.actions[..idx].contains(action) {
                return Err(Error::config(format!(
                    "action set contains {action} more than once"
                )));
            }
        }

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::config(format!(
                "learning rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        check_unit("discount factor", self.discount_factor)?;
        check_unit("epsilon", self.epsilon)?;
        check_unit("minimum epsilon", self.min_epsilon)?;
        check_unit("history reset epsilon", self.history_reset_epsilon)?;
        check_unit("full reset epsilon", self.full_reset_epsilon)?;

        for (name, value) in [
            ("epsilon", self.epsilon),
            ("history reset epsilon", self.history_reset_epsilon),
            ("full reset epsilon", self.full_reset_epsilon),
        ] {
            if self.min_epsilon > value {
                return Err(Error::config(format!(
                    "minimum epsilon {} exceeds {name} {value}",
                    self.min_epsilon
                )));
            }
        }

        if !(self.epsilon_decay.is_finite() && self.epsilon_decay >= 0.0) {
            return Err(Error::config(format!(
                "epsilon decay {} must be finite and non-negative",
                self.epsilon_decay
            )));
        }

        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config(format!("{name} {value} must be in [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LearnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_action_set() {
        let config = LearnerConfig::default().with_actions(vec![]);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_actions() {
        let config = LearnerConfig::default().with_actions(vec![Move::Rock, Move::Rock]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        assert!(LearnerConfig::default().with_learning_rate(0.0).validate().is_err());
        assert!(LearnerConfig::default().with_learning_rate(1.5).validate().is_err());
        assert!(LearnerConfig::default().with_discount_factor(-0.1).validate().is_err());
        assert!(LearnerConfig::default().with_epsilon(1.01).validate().is_err());
        assert!(LearnerConfig::default().with_epsilon_decay(-1.0).validate().is_err());
        assert!(LearnerConfig::default().with_epsilon(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_floor_above_epsilon() {
        let config = LearnerConfig::default()
            .with_epsilon(0.0)
            .with_min_epsilon(0.5);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));

        let config = LearnerConfig::default()
            .with_min_epsilon(0.2)
            .with_reset_epsilons(0.1, 0.9);
        assert!(config.validate().is_err());

        let config = LearnerConfig::default()
            .with_epsilon(0.3)
            .with_min_epsilon(0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_boundary_values_accepted() {
        let config = LearnerConfig::default()
            .with_learning_rate(1.0)
            .with_discount_factor(0.0)
            .with_epsilon(0.0)
            .with_min_epsilon(0.0)
            .with_epsilon_decay(0.0);
        assert!(config.validate().is_ok());
    }
}
