//! Error types for environment configuration failures.
//!
//! Every variant here signals an unrecoverable misconfiguration of the
//! scene or its parameters. There is no retry path: callers propagate
//! these with `?` up to the process boundary and abort.

use thiserror::Error;

/// Fatal environment configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// The obstacle schedule carried an obstacle outside the grid.
    ///
    /// The scene (grid size vs. obstacle placement and motion) is invalid
    /// for the chosen parameters and must be fixed by the caller.
    #[error("obstacle moved outside the grid to ({x}, {y}) at step {t}")]
    ObstacleOutOfBounds { x: i32, y: i32, t: u64 },

    /// Every candidate resting cell (hold, right, left, down, up) around
    /// the agent is occupied by an obstacle.
    #[error("no free resting cell around ({x}, {y}): hold and all four probes are occupied")]
    NoFreeCell { x: i32, y: i32 },

    /// An action index outside `{0, 1, 2, 3, 4}` was supplied.
    #[error("action index {0} is outside the valid range 0..5")]
    InvalidActionIndex(usize),

    /// The two goal cells coincide.
    #[error("goal cells must be distinct, both are ({x}, {y})")]
    DuplicateGoal { x: i32, y: i32 },

    /// Grid dimensions must both be positive.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// A configured cell (obstacle, goal, or start) lies outside the grid.
    #[error("{role} cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        role: &'static str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}
