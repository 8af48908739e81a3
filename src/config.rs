//! Environment and training configuration.

use crate::error::EnvError;
use crate::grid::state::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static scene configuration: grid geometry, obstacles, goals, wind.
///
/// Validated once at construction ([`EnvConfig::validate`]); the
/// simulation does not re-validate per step.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvConfig {
    /// Grid width.
    pub width: i32,
    /// Grid height.
    pub height: i32,
    /// Initial obstacle cells; the count is fixed per episode.
    pub obstacles: Vec<Cell>,
    /// First goal cell.
    pub goal_1: Cell,
    /// Reward paid on reaching the first goal.
    pub goal_1_reward: f64,
    /// Second goal cell; must differ from the first.
    pub goal_2: Cell,
    /// Reward paid on reaching the second goal.
    pub goal_2_reward: f64,
    /// Constant reward for every non-terminal step.
    pub penalty: f64,
    /// Steps between wind-phase redraws.
    pub wind_period: u64,
    /// Probability that the wind engages on a given step.
    pub wind_prob: f64,
    /// Fixed start cell for greedy evaluation rollouts.
    pub eval_start: Cell,
}

impl EnvConfig {
    /// Observation vector length: `2 * (n_obstacles + 1)`.
    pub fn observation_len(&self) -> usize {
        2 * (self.obstacles.len() + 1)
    }

    /// Context input length: three stacked observations.
    pub fn context_len(&self) -> usize {
        3 * self.observation_len()
    }

    /// Checks scene consistency: positive dimensions, distinct in-bounds
    /// goals, in-bounds obstacles and evaluation start, a valid wind
    /// period, and a wind probability in `[0, 1]`.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(EnvError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.goal_1 == self.goal_2 {
            return Err(EnvError::DuplicateGoal {
                x: self.goal_1.x,
                y: self.goal_1.y,
            });
        }
        let in_bounds = |role: &'static str, cell: Cell| -> Result<(), EnvError> {
            if cell.in_bounds(self.width, self.height) {
                Ok(())
            } else {
                Err(EnvError::CellOutOfBounds {
                    role,
                    x: cell.x,
                    y: cell.y,
                    width: self.width,
                    height: self.height,
                })
            }
        };
        in_bounds("goal", self.goal_1)?;
        in_bounds("goal", self.goal_2)?;
        in_bounds("start", self.eval_start)?;
        for &obstacle in &self.obstacles {
            in_bounds("obstacle", obstacle)?;
        }
        assert!(self.wind_period > 0, "wind period must be positive");
        assert!(
            (0.0..=1.0).contains(&self.wind_prob),
            "wind probability must lie in [0, 1]"
        );
        Ok(())
    }
}

impl Default for EnvConfig {
    /// The production 12x12 scene: four obstacles, goals in the right
    /// corners paying -20 and +20, step penalty -1, wind period 4.
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            obstacles: vec![
                Cell::new(3, 3),
                Cell::new(6, 3),
                Cell::new(3, 6),
                Cell::new(6, 6),
            ],
            goal_1: Cell::new(11, 0),
            goal_1_reward: -20.0,
            goal_2: Cell::new(11, 11),
            goal_2_reward: 20.0,
            penalty: -1.0,
            wind_period: 4,
            wind_prob: 0.1,
            eval_start: Cell::new(0, 5),
        }
    }
}

/// Training-loop hyperparameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainConfig {
    /// Number of training episodes after burn-in.
    pub n_episodes: u64,
    /// Step budget per episode before truncation.
    pub max_episode_length: u64,
    /// Episodes rolled out with a uniform-random policy to seed the
    /// replay buffer; no update happens during burn-in.
    pub burn_in_episodes: u64,
    /// Replay buffer capacity.
    pub replay_capacity: usize,
    /// Transitions sampled per learning step.
    pub batch_size: usize,
    /// Episodes between target-network snapshots.
    pub target_sync_every: u64,
    /// Discount factor.
    pub gamma: f64,
    /// Exploration rate at episode 0.
    pub epsilon_high: f64,
    /// Exploration rate floor.
    pub epsilon_low: f64,
    /// Episodes over which epsilon decays linearly from high to low.
    pub epsilon_decay_episodes: u64,
    /// Cadence of windowed average-reward log lines (0 disables).
    pub report_every: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_episodes: 50_000,
            max_episode_length: 600,
            burn_in_episodes: 1_000,
            replay_capacity: 10_000,
            batch_size: 32,
            target_sync_every: 1_000,
            gamma: 1.0,
            epsilon_high: 0.9,
            epsilon_low: 0.1,
            epsilon_decay_episodes: 25_000,
            report_every: 500,
        }
    }
}
