//! Grid cells and per-step state snapshots.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell on the grid, addressed by integer column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Creates a new cell.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this cell displaced by `(dx, dy)`, unclamped.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this cell clamped per axis to `[0, width-1] x [0, height-1]`.
    pub fn clamped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, width - 1),
            y: self.y.clamp(0, height - 1),
        }
    }

    /// Returns true if this cell lies inside `[0, width) x [0, height)`.
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An immutable snapshot of the scene at one step: the agent's cell plus
/// the cells of every obstacle.
///
/// A fresh `GridState` is built at episode start and by every transition;
/// states are never mutated in place, so copies consumed into the replay
/// buffer cannot alias later scene updates.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    coordinates: Cell,
    obstacles: Vec<Cell>,
}

impl GridState {
    /// Creates a snapshot from the agent's cell and the obstacle cells.
    ///
    /// The obstacle count is fixed for the lifetime of an episode.
    pub fn new(coordinates: Cell, obstacles: Vec<Cell>) -> Self {
        Self {
            coordinates,
            obstacles,
        }
    }

    /// The agent's cell.
    pub fn coordinates(&self) -> Cell {
        self.coordinates
    }

    /// The obstacle cells, in their fixed order.
    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    /// Returns true if `cell` is occupied by an obstacle.
    pub fn is_obstructed(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// The flattened numeric observation:
    /// `[agent.x, agent.y, obs_0.x, obs_0.y, ...]`.
    ///
    /// Derived from the coordinates and obstacles on every call, never
    /// stored separately.
    pub fn observation(&self) -> Vec<f64> {
        let mut obs = Vec::with_capacity(self.observation_len());
        obs.push(self.coordinates.x as f64);
        obs.push(self.coordinates.y as f64);
        for cell in &self.obstacles {
            obs.push(cell.x as f64);
            obs.push(cell.y as f64);
        }
        obs
    }

    /// Length of the observation vector: `2 * (n_obstacles + 1)`.
    pub fn observation_len(&self) -> usize {
        2 * (self.obstacles.len() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_layout() {
        let s = GridState::new(Cell::new(1, 2), vec![Cell::new(3, 4), Cell::new(5, 6)]);
        assert_eq!(s.observation(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(s.observation_len(), 6);
    }

    #[test]
    fn observation_without_obstacles() {
        let s = GridState::new(Cell::new(7, 0), vec![]);
        assert_eq!(s.observation(), vec![7.0, 0.0]);
        assert_eq!(s.observation_len(), 2);
    }

    #[test]
    fn cell_clamp_per_axis() {
        assert_eq!(Cell::new(-1, 15).clamped(12, 12), Cell::new(0, 11));
        assert_eq!(Cell::new(5, 5).clamped(12, 12), Cell::new(5, 5));
    }

    #[test]
    fn cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds(12, 12));
        assert!(Cell::new(11, 11).in_bounds(12, 12));
        assert!(!Cell::new(12, 0).in_bounds(12, 12));
        assert!(!Cell::new(0, -1).in_bounds(12, 12));
    }

    #[test]
    fn obstruction_check() {
        let s = GridState::new(Cell::new(0, 0), vec![Cell::new(3, 3)]);
        assert!(s.is_obstructed(Cell::new(3, 3)));
        assert!(!s.is_obstructed(Cell::new(3, 4)));
    }
}
