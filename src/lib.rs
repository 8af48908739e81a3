//! windgrid - grid-world navigation under a time-varying wind field.
//!
//! Simulates an agent moving on a bounded integer grid among cyclically
//! moving obstacles, perturbed by a hidden wind direction that is redrawn
//! every few steps. On top of the environment sits a value-based training
//! loop: epsilon-greedy rollouts, an experience-replay ring buffer, and
//! bootstrapped Q-targets computed against a periodically refreshed
//! target-network snapshot.
//!
//! The function approximator itself is a collaborator: anything that
//! implements [`QFunction`] (action values from a context observation,
//! a state reset, a deep snapshot, and an update step) can be trained
//! and evaluated by the [`Trainer`].

pub mod config;
pub mod error;
pub mod grid;
pub mod policy;
pub mod training;

pub use config::{EnvConfig, TrainConfig};
pub use error::EnvError;
pub use grid::action::{Action, N_ACTIONS};
pub use grid::reward::{GoalRewardFn, RewardFunction};
pub use grid::state::{Cell, GridState};
pub use grid::transition::{cyclic_obstacle_schedule, ObstacleSchedule, TransitionFunction};
pub use grid::wind::{WindPhase, WindPhaseProcess};
pub use policy::{argmax, ActionValues, FixedQ, LinearQ, QFunction, TrainingTarget};
pub use training::explore::{epsilon_greedy, free_cells, linear_decay_epsilon, sample_start};
pub use training::metrics::{EpisodeRecord, EvalReport, TrainingLog};
pub use training::replay::{ExperienceReplay, Transition};
pub use training::trainer::Trainer;
