//! A minimal linear action-value function with SGD updates.
//!
//! One weight row per action over the context features (optionally with
//! the wind phase appended). Deliberately small: the trainer contract is
//! what matters, not the approximator's capacity.

use crate::grid::action::N_ACTIONS;
use crate::policy::trait_::{ActionValues, QFunction, TrainingTarget};

/// Linear Q-function: `Q(x)[a] = w_a · x + b_a`.
#[derive(Debug, Clone)]
pub struct LinearQ {
    weights: Vec<Vec<f64>>,
    bias: [f64; N_ACTIONS],
    learning_rate: f64,
    use_phase: bool,
    n_features: usize,
}

impl LinearQ {
    /// Creates a zero-initialized linear Q-function.
    ///
    /// # Arguments
    ///
    /// * `context_len` - Length of the context observation vector
    /// * `use_phase` - Whether the wind phase is appended as a feature
    /// * `learning_rate` - SGD step size
    pub fn new(context_len: usize, use_phase: bool, learning_rate: f64) -> Self {
        let n_features = context_len + usize::from(use_phase);
        Self {
            weights: vec![vec![0.0; n_features]; N_ACTIONS],
            bias: [0.0; N_ACTIONS],
            learning_rate,
            use_phase,
            n_features,
        }
    }

    /// Number of input features (context plus phase, if enabled).
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn features(&self, context: &[f64], phase: f64) -> Vec<f64> {
        let mut x = Vec::with_capacity(self.n_features);
        x.extend_from_slice(context);
        if self.use_phase {
            x.push(phase);
        }
        assert_eq!(
            x.len(),
            self.n_features,
            "context length does not match the configured feature size"
        );
        x
    }

    fn predict(&self, x: &[f64]) -> ActionValues {
        let mut values = self.bias;
        for (a, row) in self.weights.iter().enumerate() {
            values[a] += row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>();
        }
        values
    }
}

impl QFunction for LinearQ {
    fn forward(&mut self, context: &[f64], phase: f64) -> ActionValues {
        let x = self.features(context, phase);
        self.predict(&x)
    }

    fn snapshot(&self) -> Box<dyn QFunction> {
        Box::new(self.clone())
    }

    fn update(&mut self, batch: &[TrainingTarget]) {
        if batch.is_empty() {
            return;
        }
        // Averaged MSE gradient; entries equal to the prediction
        // contribute nothing, so only the taken action moves.
        let scale = self.learning_rate / batch.len() as f64;
        for target in batch {
            let x = self.features(&target.input, target.phase);
            let predicted = self.predict(&x);
            for a in 0..N_ACTIONS {
                let err = predicted[a] - target.values[a];
                if err == 0.0 {
                    continue;
                }
                for (w, v) in self.weights[a].iter_mut().zip(&x) {
                    *w -= scale * err * v;
                }
                self.bias[a] -= scale * err;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_initialized_forward_is_zero() {
        let mut q = LinearQ::new(4, false, 0.1);
        assert_eq!(q.forward(&[1.0, 2.0, 3.0, 4.0], 0.0), [0.0; N_ACTIONS]);
    }

    #[test]
    fn phase_feature_extends_input() {
        let q = LinearQ::new(4, true, 0.1);
        assert_eq!(q.n_features(), 5);
        let q = LinearQ::new(4, false, 0.1);
        assert_eq!(q.n_features(), 4);
    }

    #[test]
    fn update_moves_prediction_toward_target() {
        let mut q = LinearQ::new(2, false, 0.05);
        let input = vec![1.0, -1.0];
        let mut values = q.forward(&input, 0.0);
        values[3] = 2.0; // target only the taken action
        let target = TrainingTarget {
            input: input.clone(),
            phase: 0.0,
            values,
        };
        let before = (q.forward(&input, 0.0)[3] - 2.0).abs();
        for _ in 0..50 {
            q.update(std::slice::from_ref(&target));
        }
        let after = (q.forward(&input, 0.0)[3] - 2.0).abs();
        assert!(after < before);
        // untouched actions stay at their prediction
        assert_eq!(q.forward(&input, 0.0)[0], 0.0);
    }

    #[test]
    fn snapshot_does_not_track_online_updates() {
        let q = LinearQ::new(2, false, 0.1);
        let mut frozen = q.snapshot();
        let mut online = q;
        let target = TrainingTarget {
            input: vec![1.0, 1.0],
            phase: 0.0,
            values: [1.0, 1.0, 1.0, 1.0, 1.0],
        };
        online.update(std::slice::from_ref(&target));
        assert_ne!(online.forward(&[1.0, 1.0], 0.0), [0.0; N_ACTIONS]);
        assert_eq!(frozen.forward(&[1.0, 1.0], 0.0), [0.0; N_ACTIONS]);
    }
}
