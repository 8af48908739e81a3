//! Episode records and evaluation reports.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one training episode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeRecord {
    /// Sum of rewards collected over the episode.
    pub total_reward: f64,
    /// Number of environment steps taken.
    pub length: u64,
}

/// In-memory log of per-episode `(total_reward, length)` pairs.
///
/// Persisting the log to a file is a collaborator concern; the core keeps
/// the records and their windowed averages.
#[derive(Debug, Default)]
pub struct TrainingLog {
    records: Vec<EpisodeRecord>,
}

impl TrainingLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one episode record.
    pub fn push(&mut self, record: EpisodeRecord) {
        self.records.push(record);
    }

    /// Number of recorded episodes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    /// Mean reward and mean length over the most recent `window` records,
    /// or `None` while the log is still empty.
    pub fn window_average(&self, window: usize) -> Option<(f64, f64)> {
        if self.records.is_empty() || window == 0 {
            return None;
        }
        let tail = &self.records[self.records.len().saturating_sub(window)..];
        let n = tail.len() as f64;
        let reward = tail.iter().map(|r| r.total_reward).sum::<f64>() / n;
        let length = tail.iter().map(|r| r.length as f64).sum::<f64>() / n;
        Some((reward, length))
    }
}

/// Aggregated outcome of greedy evaluation rollouts.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalReport {
    /// Number of rollouts run.
    pub n_rollouts: usize,
    /// Mean total reward per rollout.
    pub mean_reward: f64,
    /// Mean steps per rollout.
    pub mean_length: f64,
    /// Rollouts that hit the step budget instead of a goal.
    pub n_truncated: usize,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Greedy evaluation ({} rollouts) ===", self.n_rollouts)?;
        writeln!(f, "  Mean reward:   {:.2}", self.mean_reward)?;
        writeln!(f, "  Mean length:   {:.1}", self.mean_length)?;
        write!(f, "  Truncated:     {}", self.n_truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_average_over_tail() {
        let mut log = TrainingLog::new();
        for i in 0..10 {
            log.push(EpisodeRecord {
                total_reward: i as f64,
                length: 2 * i as u64,
            });
        }
        let (reward, length) = log.window_average(4).unwrap();
        assert!((reward - 7.5).abs() < 1e-12); // mean of 6..=9
        assert!((length - 15.0).abs() < 1e-12);
    }

    #[test]
    fn window_larger_than_log_uses_everything() {
        let mut log = TrainingLog::new();
        log.push(EpisodeRecord {
            total_reward: 2.0,
            length: 3,
        });
        let (reward, length) = log.window_average(100).unwrap();
        assert_eq!(reward, 2.0);
        assert_eq!(length, 3.0);
    }

    #[test]
    fn empty_log_has_no_average() {
        let log = TrainingLog::new();
        assert!(log.window_average(10).is_none());
    }

    #[test]
    fn report_displays() {
        let report = EvalReport {
            n_rollouts: 3,
            mean_reward: -12.5,
            mean_length: 40.0,
            n_truncated: 1,
        };
        let text = report.to_string();
        assert!(text.contains("3 rollouts"));
        assert!(text.contains("-12.50"));
    }
}
