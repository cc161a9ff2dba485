//! Takt time sweep.
//!
//! Grid search over takt values from the largest effective task time up
//! to the total raw task time, in fixed steps. Each candidate is solved
//! and the smoothest line wins; on equal smoothness the smaller takt
//! (tried first) is kept.

use tracing::{debug, instrument};

use super::StationAssigner;
use crate::error::Result;
use crate::models::{BalanceResult, Task};

impl StationAssigner {
    /// Returns the smoothest assignment over the takt grid.
    ///
    /// `None` when the task list is empty or no candidate produced a
    /// station.
    ///
    /// # Errors
    /// `InvalidParameter` for a non-positive step; `PrecedenceCycle` from
    /// the underlying solve.
    #[instrument(skip_all, fields(task_count = tasks.len(), max_tasks = max_tasks_per_station))]
    pub fn optimize_takt(
        &self,
        tasks: &[Task],
        max_tasks_per_station: usize,
    ) -> Result<Option<BalanceResult>> {
        self.config().validate()?;
        let Some((min_takt, max_takt)) = takt_bounds(tasks) else {
            return Ok(None);
        };
        let step = self.config().takt_step;

        let mut best: Option<BalanceResult> = None;
        let mut evaluated = 0usize;
        for takt in takt_grid(min_takt, max_takt, step) {
            let result = self.solve(tasks, takt, max_tasks_per_station)?;
            evaluated += 1;
            if result.stations.is_empty() {
                continue;
            }
            let improves = best
                .as_ref()
                .map_or(true, |b| result.smoothness_index < b.smoothness_index);
            if improves {
                debug!(takt, si = result.smoothness_index, "smoother takt");
                best = Some(result);
            }
        }

        debug!(
            evaluated,
            best_takt = ?best.as_ref().map(|b| b.takt_time),
            "takt sweep finished"
        );
        Ok(best)
    }
}

/// Sweep with the default configuration.
pub fn optimize_takt(tasks: &[Task], max_tasks_per_station: usize) -> Result<Option<BalanceResult>> {
    StationAssigner::new().optimize_takt(tasks, max_tasks_per_station)
}

/// `(max effective time, sum of raw times)`; `None` for no tasks.
pub fn takt_bounds(tasks: &[Task]) -> Option<(f64, f64)> {
    if tasks.is_empty() {
        return None;
    }
    let min = tasks.iter().map(Task::effective_time).fold(f64::MIN, f64::max);
    let max = tasks.iter().map(|t| t.time).sum();
    Some((min, max))
}

/// `min, min + step, ...` up to and including `max`.
///
/// Values are computed as `min + k * step` so long sweeps do not drift.
pub fn takt_grid(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && max >= min {
        ((max - min) / step + 1e-9).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |k| min + k as f64 * step)
}
