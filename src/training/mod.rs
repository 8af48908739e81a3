//! Training orchestration: replay storage, exploration, the episode loop,
//! and evaluation metrics.

pub mod explore;
pub mod metrics;
pub mod replay;
pub mod trainer;

pub use explore::{epsilon_greedy, free_cells, linear_decay_epsilon, sample_start};
pub use metrics::{EpisodeRecord, EvalReport, TrainingLog};
pub use replay::{ExperienceReplay, Transition};
pub use trainer::Trainer;
