//! Exploration: epsilon-greedy selection, linear decay, start sampling.

use rand::rngs::StdRng;
use rand::Rng;

use crate::grid::action::{Action, N_ACTIONS};
use crate::grid::state::Cell;
use crate::policy::trait_::{argmax, ActionValues};

/// Linearly decayed exploration rate.
///
/// Equals `high` at episode 0, reaches `low` at episode `n_decay`, and
/// stays clamped at `low` beyond.
pub fn linear_decay_epsilon(episode: u64, n_decay: u64, low: f64, high: f64) -> f64 {
    if episode >= n_decay {
        low
    } else {
        ((low - high) / n_decay as f64) * episode as f64 + high
    }
}

/// Epsilon-greedy selection over an action-value vector.
///
/// With probability `1 - epsilon` takes the greedy action; otherwise a
/// uniform-random action independent of the value estimates.
pub fn epsilon_greedy(values: &ActionValues, epsilon: f64, rng: &mut StdRng) -> Action {
    if rng.gen::<f64>() > epsilon {
        Action::all()[argmax(values)]
    } else {
        random_action(rng)
    }
}

/// A uniform-random action.
pub fn random_action(rng: &mut StdRng) -> Action {
    Action::all()[rng.gen_range(0..N_ACTIONS)]
}

/// All cells of a `width x height` grid not occupied by an obstacle, in
/// row-major order.
pub fn free_cells(width: i32, height: i32, obstacles: &[Cell]) -> Vec<Cell> {
    let mut cells =
        Vec::with_capacity((width as usize * height as usize).saturating_sub(obstacles.len()));
    for x in 0..width {
        for y in 0..height {
            let cell = Cell::new(x, y);
            if !obstacles.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Draws a start cell uniformly from the free cells.
///
/// # Panics
///
/// Panics if `free` is empty; a scene with no free cell is a
/// configuration error caught before training starts.
pub fn sample_start(free: &[Cell], rng: &mut StdRng) -> Cell {
    assert!(!free.is_empty(), "no free cells to start from");
    free[rng.gen_range(0..free.len())]
}
