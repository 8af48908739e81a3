//! The value-function capability contract.

use crate::grid::action::N_ACTIONS;

/// Estimated values for each of the five actions, in index order.
pub type ActionValues = [f64; N_ACTIONS];

/// One supervised target handed to [`QFunction::update`]: the context
/// input the values were predicted from, the wind phase at decision time,
/// and the desired action-value vector.
///
/// Only the taken action's entry differs from the online prediction, so
/// an MSE-style update moves that entry alone.
#[derive(Debug, Clone)]
pub struct TrainingTarget {
    pub input: Vec<f64>,
    pub phase: f64,
    pub values: ActionValues,
}

/// An action-value function over context observations.
///
/// Variants (plain, phase-as-input, phase-conditioned, recurrent) are
/// selected at construction; the loop always passes the phase scalar and
/// implementations decide whether it participates.
pub trait QFunction {
    /// Action-value estimates for a context observation.
    fn forward(&mut self, context: &[f64], phase: f64) -> ActionValues;

    /// Clears internal recurrent state, if any.
    ///
    /// Called at the start of every episode and after every update step;
    /// episodes are independent rollouts.
    fn reset(&mut self) {}

    /// An independent, fully-owned copy with no aliasing to `self`.
    ///
    /// Used to freeze the target network: updates to the online function
    /// must not retroactively change bootstrap targets in flight.
    fn snapshot(&self) -> Box<dyn QFunction>;

    /// One optimizer step toward the given targets.
    ///
    /// Stub implementations may no-op.
    fn update(&mut self, batch: &[TrainingTarget]);
}

/// Index of the largest value, first occurrence winning ties.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
