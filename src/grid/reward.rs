//! The stateful per-episode reward function.

use std::fmt;

use crate::error::EnvError;
use crate::grid::action::Action;
use crate::grid::state::{Cell, GridState};

/// A goal reward as a function of a frequency parameter, the reward
/// timer, and an optional phase parameter.
///
/// The production configurations return constants, but the
/// function-of-time signature is part of the contract: time-varying goal
/// rewards plug in without touching the evaluation path.
pub type GoalRewardFn = Box<dyn Fn(f64, u64, Option<f64>) -> f64 + Send>;

/// Scores transitions and signals episode termination.
///
/// Long-lived and reused across episodes via [`RewardFunction::reset`];
/// the internal timer increments by exactly one per [`evaluate`] call and
/// only an explicit reset clears it.
///
/// [`evaluate`]: RewardFunction::evaluate
pub struct RewardFunction {
    penalty: f64,
    goal_1: Cell,
    goal_2: Cell,
    goal_1_fn: GoalRewardFn,
    goal_2_fn: GoalRewardFn,
    w1: f64,
    w2: f64,
    phase_param: Option<f64>,
    t: u64,
    terminal: bool,
}

impl RewardFunction {
    /// Creates a reward function with custom goal-reward closures.
    ///
    /// # Arguments
    ///
    /// * `penalty` - Constant reward for every non-terminal transition
    /// * `goal_1`, `goal_2` - The two terminal cells; must be distinct
    /// * `goal_1_fn`, `goal_2_fn` - Rewards paid on reaching each goal
    /// * `w1`, `w2` - Frequency parameters forwarded to the closures
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        penalty: f64,
        goal_1: Cell,
        goal_1_fn: GoalRewardFn,
        goal_2: Cell,
        goal_2_fn: GoalRewardFn,
        w1: f64,
        w2: f64,
    ) -> Result<Self, EnvError> {
        if goal_1 == goal_2 {
            return Err(EnvError::DuplicateGoal {
                x: goal_1.x,
                y: goal_1.y,
            });
        }
        Ok(Self {
            penalty,
            goal_1,
            goal_2,
            goal_1_fn,
            goal_2_fn,
            w1,
            w2,
            phase_param: None,
            t: 0,
            terminal: false,
        })
    }

    /// Creates a reward function whose goals pay fixed constants.
    pub fn constant_goals(
        penalty: f64,
        goal_1: Cell,
        goal_1_reward: f64,
        goal_2: Cell,
        goal_2_reward: f64,
    ) -> Result<Self, EnvError> {
        Self::new(
            penalty,
            goal_1,
            Box::new(move |_, _, _| goal_1_reward),
            goal_2,
            Box::new(move |_, _, _| goal_2_reward),
            0.0,
            0.0,
        )
    }

    /// The first goal cell.
    pub fn goal_1(&self) -> Cell {
        self.goal_1
    }

    /// The second goal cell.
    pub fn goal_2(&self) -> Cell {
        self.goal_2
    }

    /// The internal reward timer.
    pub fn t(&self) -> u64 {
        self.t
    }

    /// Whether the last evaluated transition reached a goal.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Scores a transition and advances the internal timer.
    ///
    /// Returns the penalty when the next coordinates match neither goal;
    /// otherwise marks the episode terminal and returns the matching
    /// goal's reward evaluated at the post-increment timer.
    pub fn evaluate(&mut self, _state: &GridState, _action: Action, next: &GridState) -> f64 {
        self.t += 1;
        let coordinates = next.coordinates();
        if coordinates == self.goal_1 {
            self.terminal = true;
            (self.goal_1_fn)(self.w1, self.t, self.phase_param)
        } else if coordinates == self.goal_2 {
            self.terminal = true;
            (self.goal_2_fn)(self.w2, self.t, self.phase_param)
        } else {
            self.penalty
        }
    }

    /// Clears the terminal flag and the timer for a new episode.
    pub fn reset(&mut self) {
        self.terminal = false;
        self.t = 0;
    }

    /// Resets and swaps in replacement goal-reward closures where given.
    pub fn reset_with(&mut self, goal_1_fn: Option<GoalRewardFn>, goal_2_fn: Option<GoalRewardFn>) {
        self.reset();
        if let Some(f) = goal_1_fn {
            self.goal_1_fn = f;
        }
        if let Some(f) = goal_2_fn {
            self.goal_2_fn = f;
        }
    }
}

impl fmt::Debug for RewardFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewardFunction")
            .field("penalty", &self.penalty)
            .field("goal_1", &self.goal_1)
            .field("goal_2", &self.goal_2)
            .field("t", &self.t)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}
