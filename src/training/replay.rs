//! Fixed-capacity experience replay with ring-buffer overwrite.

use rand::rngs::StdRng;
use rand::Rng;

use crate::grid::action::Action;
use crate::grid::state::GridState;
use crate::grid::wind::WindPhase;

/// Concatenates the observations of a context window into one flat input.
pub fn stack_observations(states: &[GridState]) -> Vec<f64> {
    let mut input = Vec::with_capacity(states.iter().map(|s| s.observation_len()).sum());
    for state in states {
        input.extend(state.observation());
    }
    input
}

/// One stored transition: the three-state context at decision time, the
/// chosen action, the scalar reward, the resulting state, the wind phase
/// at this and the next decision time, and the terminal flag.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Context window, oldest first.
    pub context: [GridState; 3],
    pub action: Action,
    pub reward: f64,
    pub next_state: GridState,
    pub phase: WindPhase,
    pub next_phase: WindPhase,
    pub terminal: bool,
}

impl Transition {
    /// The context window advanced by one step: the two newest states
    /// plus the resulting state.
    pub fn next_context(&self) -> [GridState; 3] {
        [
            self.context[1].clone(),
            self.context[2].clone(),
            self.next_state.clone(),
        ]
    }

    /// Flat network input for the decision-time context.
    pub fn input(&self) -> Vec<f64> {
        stack_observations(&self.context)
    }

    /// Flat network input for the next-step context, used to evaluate the
    /// bootstrap target.
    pub fn next_input(&self) -> Vec<f64> {
        stack_observations(&self.next_context())
    }
}

/// Fixed-capacity transition store with uniform random sampling.
///
/// Before reaching capacity, `add` appends; at capacity, a monotonically
/// advancing cursor overwrites the oldest slot in round-robin order, so
/// insertion stays O(1) and overwrite order is FIFO by insertion.
#[derive(Debug)]
pub struct ExperienceReplay {
    buffer: Vec<Transition>,
    capacity: usize,
    cursor: usize,
}

impl ExperienceReplay {
    /// Creates an empty replay store.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "replay capacity must be positive");
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Maximum number of stored transitions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of stored transitions.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stores a transition, overwriting the oldest entry once full.
    pub fn add(&mut self, transition: Transition) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(transition);
        } else {
            self.buffer[self.cursor] = transition;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    /// Draws one transition uniformly at random.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty; sampling before any rollout is a
    /// logic error, not a runtime condition.
    pub fn sample(&self, rng: &mut StdRng) -> &Transition {
        assert!(!self.buffer.is_empty(), "cannot sample an empty replay buffer");
        &self.buffer[rng.gen_range(0..self.buffer.len())]
    }

    /// Draws `n` transitions uniformly with replacement.
    pub fn sample_batch(&self, n: usize, rng: &mut StdRng) -> Vec<&Transition> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}
