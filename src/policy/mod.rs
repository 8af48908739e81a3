//! The value-function capability and its built-in providers.
//!
//! The training loop only requires the [`QFunction`] contract; network
//! internals live behind it. [`FixedQ`] is a deterministic stub for
//! evaluation-path tests and baselines, [`LinearQ`] a minimal linear
//! approximator so the loop is exercisable end to end.

pub mod fixed;
pub mod linear;
pub mod trait_;

pub use fixed::FixedQ;
pub use linear::LinearQ;
pub use trait_::{argmax, ActionValues, QFunction, TrainingTarget};
