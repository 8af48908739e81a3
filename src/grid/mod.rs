//! The grid-world environment: states, actions, wind, transitions, rewards.

pub mod action;
pub mod reward;
pub mod state;
pub mod transition;
pub mod wind;

pub use action::{Action, N_ACTIONS};
pub use reward::{GoalRewardFn, RewardFunction};
pub use state::{Cell, GridState};
pub use transition::{cyclic_obstacle_schedule, ObstacleSchedule, TransitionFunction};
pub use wind::{WindPhase, WindPhaseProcess};
