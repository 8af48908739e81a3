//! The discrete action space: hold position or move one cell.

use crate::error::EnvError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of discrete actions.
pub const N_ACTIONS: usize = 5;

/// One of the five discrete moves available to the agent.
///
/// Index mapping: 0 = stay, 1 = up, 2 = down, 3 = left, 4 = right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    Stay,
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in index order.
    pub const fn all() -> [Action; N_ACTIONS] {
        [
            Action::Stay,
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Right,
        ]
    }

    /// Maps an action index in `0..5` to an action.
    pub fn from_index(index: usize) -> Result<Action, EnvError> {
        Self::all()
            .get(index)
            .copied()
            .ok_or(EnvError::InvalidActionIndex(index))
    }

    /// The index of this action.
    pub const fn index(self) -> usize {
        match self {
            Action::Stay => 0,
            Action::Up => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Right => 4,
        }
    }

    /// The 2D displacement applied to the agent's cell.
    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Action::Stay => (0, 0),
            Action::Up => (0, 1),
            Action::Down => (0, -1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }
}
