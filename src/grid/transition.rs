//! The transition function: obstacle motion, wind perturbation, boundary
//! clamping, and collision resolution.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::EnvError;
use crate::grid::action::Action;
use crate::grid::state::{Cell, GridState};
use crate::grid::wind::{WindPhase, WindPhaseProcess};

/// Displacement applied to every obstacle at a given global time.
pub type ObstacleSchedule = fn(u64) -> (i32, i32);

/// The production obstacle schedule: a period-6 cycle
/// up, right, right, down, left, left, with net displacement zero.
pub fn cyclic_obstacle_schedule(t: u64) -> (i32, i32) {
    match t % 6 {
        0 => (0, 1),
        1 | 2 => (1, 0),
        3 => (0, -1),
        _ => (-1, 0),
    }
}

/// A schedule that never moves the obstacles. Useful for tests and static
/// scenes.
pub fn static_obstacle_schedule(_t: u64) -> (i32, i32) {
    (0, 0)
}

/// Computes the next [`GridState`] from a state and an action.
///
/// Owns the hidden [`WindPhaseProcess`]; with probability `wind_prob` the
/// current phase's offset is added to the agent's displacement.
///
/// The function's time base runs one step ahead of the reward timer:
/// `step(state, action, t)` advances obstacles with the schedule at `t + 1`
/// while querying the wind phase at `t`. Reward is evaluated after the
/// transition, and its timer owns `t`. This offset is load-bearing; the
/// reward timer must lag the transition by exactly one step.
#[derive(Debug)]
pub struct TransitionFunction {
    width: i32,
    height: i32,
    schedule: ObstacleSchedule,
    wind: WindPhaseProcess,
    wind_prob: f64,
}

impl TransitionFunction {
    /// Creates a transition function for a `width x height` grid.
    ///
    /// # Arguments
    ///
    /// * `schedule` - Per-step obstacle displacement as a function of time
    /// * `wind_period` - Steps between wind-phase redraws
    /// * `wind_prob` - Probability that the wind engages on a given step
    pub fn new(
        width: i32,
        height: i32,
        schedule: ObstacleSchedule,
        wind_period: u64,
        wind_prob: f64,
    ) -> Self {
        Self {
            width,
            height,
            schedule,
            wind: WindPhaseProcess::new(wind_period),
            wind_prob,
        }
    }

    /// Grid width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The wind phase at time `t` (drawing it if the bucket is new).
    pub fn phase(&mut self, t: u64, rng: &mut StdRng) -> WindPhase {
        self.wind.phase(t, rng)
    }

    /// Clears the wind process for a new episode.
    pub fn reset_wind(&mut self) {
        self.wind.reset();
    }

    /// Advances the scene by one step.
    ///
    /// 1. Advance every obstacle by the schedule's displacement at `t + 1`;
    ///    an obstacle leaving the grid is a fatal configuration error.
    /// 2. Query the wind phase at `t`; with probability `wind_prob` add its
    ///    offset to the action's displacement.
    /// 3. Clamp the candidate cell per axis to the grid.
    /// 4. If the candidate lands on an advanced obstacle, hold position if
    ///    the current cell is free; otherwise probe right, left, down, up
    ///    (each clamped) and take the first free cell. All five candidates
    ///    occupied is a fatal configuration error.
    pub fn step(
        &mut self,
        state: &GridState,
        action: Action,
        t: u64,
        rng: &mut StdRng,
    ) -> Result<GridState, EnvError> {
        let (mut dx, mut dy) = action.displacement();
        let t = t + 1; // reward timer lags the transition by one

        let (obs_dx, obs_dy) = (self.schedule)(t);
        let mut obstacles = Vec::with_capacity(state.obstacles().len());
        for &obstacle in state.obstacles() {
            let moved = obstacle.offset(obs_dx, obs_dy);
            if !moved.in_bounds(self.width, self.height) {
                return Err(EnvError::ObstacleOutOfBounds {
                    x: moved.x,
                    y: moved.y,
                    t,
                });
            }
            obstacles.push(moved);
        }

        // Phase is computed on the pre-increment time so that phase and
        // obstacle advancement stay one step apart.
        let phase = self.wind.phase(t - 1, rng);
        if rng.gen::<f64>() < self.wind_prob {
            let (wx, wy) = phase.offset();
            dx += wx;
            dy += wy;
        }

        let here = state.coordinates();
        let mut next = here.offset(dx, dy).clamped(self.width, self.height);
        if obstacles.contains(&next) {
            next = self.resolve_collision(here, &obstacles)?;
        }

        Ok(GridState::new(next, obstacles))
    }

    /// Finds a resting cell when the candidate is occupied: hold position
    /// if free, else probe in fixed priority order right, left, down, up.
    fn resolve_collision(&self, here: Cell, obstacles: &[Cell]) -> Result<Cell, EnvError> {
        if !obstacles.contains(&here) {
            return Ok(here);
        }
        for (dx, dy) in [(1, 0), (-1, 0), (0, -1), (0, 1)] {
            let probe = here.offset(dx, dy).clamped(self.width, self.height);
            if !obstacles.contains(&probe) {
                return Ok(probe);
            }
        }
        Err(EnvError::NoFreeCell {
            x: here.x,
            y: here.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn calm(width: i32, height: i32) -> TransitionFunction {
        TransitionFunction::new(width, height, static_obstacle_schedule, 4, 0.0)
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn coordinates_stay_in_bounds() {
        let mut rng = rng(1);
        let mut transition = TransitionFunction::new(12, 12, static_obstacle_schedule, 4, 0.5);
        let mut state = GridState::new(Cell::new(0, 5), vec![Cell::new(3, 3)]);
        for t in 0..500u64 {
            let action = Action::all()[rng.gen_range(0..5)];
            state = transition.step(&state, action, t, &mut rng).unwrap();
            let c = state.coordinates();
            assert!(c.in_bounds(12, 12), "agent escaped to {c}");
        }
    }

    #[test]
    fn agent_never_rests_on_an_obstacle() {
        // Fuzz random layouts of up to 4 obstacles on a 12x12 grid. With
        // at most 4 obstacles at least one of the five candidate cells is
        // always free, so resolution must succeed.
        let mut rng = rng(2);
        for _ in 0..200 {
            let n_obstacles = rng.gen_range(1..=4);
            let obstacles: Vec<Cell> = (0..n_obstacles)
                .map(|_| Cell::new(rng.gen_range(0..12), rng.gen_range(0..12)))
                .collect();
            // a start on an obstacle could leave no free candidate at a
            // corner, which the resolution guarantee does not cover
            let start = loop {
                let cell = Cell::new(rng.gen_range(0..12), rng.gen_range(0..12));
                if !obstacles.contains(&cell) {
                    break cell;
                }
            };
            let mut transition =
                TransitionFunction::new(12, 12, static_obstacle_schedule, 4, 0.3);
            let mut state = GridState::new(start, obstacles);
            for t in 0..40u64 {
                let action = Action::all()[rng.gen_range(0..5)];
                state = transition.step(&state, action, t, &mut rng).unwrap();
                assert!(
                    !state.is_obstructed(state.coordinates()),
                    "agent at {} shares a cell with an obstacle",
                    state.coordinates()
                );
            }
        }
    }

    #[test]
    fn obstacle_leaving_grid_is_fatal() {
        fn push_right(_t: u64) -> (i32, i32) {
            (1, 0)
        }
        let mut rng = rng(3);
        let mut transition = TransitionFunction::new(12, 12, push_right, 4, 0.0);
        let mut state = GridState::new(Cell::new(0, 0), vec![Cell::new(9, 5)]);
        let mut result = Ok(());
        for t in 0..5u64 {
            match transition.step(&state, Action::Stay, t, &mut rng) {
                Ok(next) => state = next,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        assert_eq!(
            result,
            Err(EnvError::ObstacleOutOfBounds { x: 12, y: 5, t: 3 })
        );
    }

    #[test]
    fn blocked_candidate_holds_position() {
        let mut rng = rng(4);
        let mut transition = calm(12, 12);
        let state = GridState::new(Cell::new(5, 5), vec![Cell::new(5, 6)]);
        let next = transition.step(&state, Action::Up, 0, &mut rng).unwrap();
        assert_eq!(next.coordinates(), Cell::new(5, 5));
    }

    #[test]
    fn occupied_hold_probes_right_first() {
        let mut rng = rng(5);
        let mut transition = calm(12, 12);
        // Candidate (5,6) and the current cell are both occupied.
        let state = GridState::new(Cell::new(5, 5), vec![Cell::new(5, 6), Cell::new(5, 5)]);
        let next = transition.step(&state, Action::Up, 0, &mut rng).unwrap();
        assert_eq!(next.coordinates(), Cell::new(6, 5));
    }

    #[test]
    fn probe_order_falls_back_left_then_down_then_up() {
        let mut rng = rng(6);
        let mut transition = calm(12, 12);
        let base = vec![Cell::new(5, 6), Cell::new(5, 5), Cell::new(6, 5)];
        let state = GridState::new(Cell::new(5, 5), base.clone());
        let next = transition.step(&state, Action::Up, 0, &mut rng).unwrap();
        assert_eq!(next.coordinates(), Cell::new(4, 5));

        let mut blocked_left = base.clone();
        blocked_left.push(Cell::new(4, 5));
        let state = GridState::new(Cell::new(5, 5), blocked_left.clone());
        let next = transition.step(&state, Action::Up, 0, &mut rng).unwrap();
        assert_eq!(next.coordinates(), Cell::new(5, 4));

        let mut blocked_down = blocked_left;
        blocked_down.push(Cell::new(5, 4));
        // The up probe (5,6) is already occupied by the first obstacle, so
        // a sixth obstacle is not needed to exhaust every candidate.
        let state = GridState::new(Cell::new(5, 5), blocked_down);
        let result = transition.step(&state, Action::Up, 0, &mut rng);
        assert_eq!(result, Err(EnvError::NoFreeCell { x: 5, y: 5 }));
    }

    #[test]
    fn obstacles_advance_with_the_incremented_time() {
        fn move_at_one(t: u64) -> (i32, i32) {
            if t == 1 {
                (1, 0)
            } else {
                (0, 0)
            }
        }
        let mut rng = rng(7);
        let mut transition = TransitionFunction::new(12, 12, move_at_one, 4, 0.0);
        let state = GridState::new(Cell::new(0, 0), vec![Cell::new(3, 3)]);
        // step() is called with the reward timer at 0 but advances the
        // scene to time 1, so the schedule fires immediately.
        let next = transition.step(&state, Action::Stay, 0, &mut rng).unwrap();
        assert_eq!(next.obstacles(), &[Cell::new(4, 3)]);
    }

    #[test]
    fn cyclic_schedule_is_closed_over_a_period() {
        let mut total = (0, 0);
        for t in 0..6u64 {
            let (dx, dy) = cyclic_obstacle_schedule(t);
            total = (total.0 + dx, total.1 + dy);
        }
        assert_eq!(total, (0, 0));
    }

    #[test]
    fn wind_can_displace_a_stationary_agent() {
        // With wind probability 1 the agent cannot hold still.
        let mut rng = rng(8);
        let mut transition = TransitionFunction::new(12, 12, static_obstacle_schedule, 4, 1.0);
        let state = GridState::new(Cell::new(5, 5), vec![]);
        let next = transition.step(&state, Action::Stay, 0, &mut rng).unwrap();
        assert_ne!(next.coordinates(), Cell::new(5, 5));
        let c = next.coordinates();
        assert_eq!((c.x - 5).abs() + (c.y - 5).abs(), 1);
    }
}
