//! Deterministic stub value function for tests and baselines.

use crate::grid::action::{Action, N_ACTIONS};
use crate::policy::trait_::{ActionValues, QFunction, TrainingTarget};

/// A value function that returns the same action-value vector for every
/// input and ignores updates.
///
/// Useful for exercising the rollout, truncation, and averaging paths
/// with a known action sequence.
#[derive(Debug, Clone)]
pub struct FixedQ {
    values: ActionValues,
}

impl FixedQ {
    /// Creates a stub returning `values` everywhere.
    pub fn new(values: ActionValues) -> Self {
        Self { values }
    }

    /// Creates a stub whose greedy choice is always `action`.
    pub fn preferring(action: Action) -> Self {
        let mut values = [0.0; N_ACTIONS];
        values[action.index()] = 1.0;
        Self { values }
    }
}

impl QFunction for FixedQ {
    fn forward(&mut self, _context: &[f64], _phase: f64) -> ActionValues {
        self.values
    }

    fn snapshot(&self) -> Box<dyn QFunction> {
        Box::new(self.clone())
    }

    fn update(&mut self, _batch: &[TrainingTarget]) {}
}
