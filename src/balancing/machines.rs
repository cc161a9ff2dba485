//! Machine reduction.
//!
//! Local search that walks the task list in order and removes parallel
//! machines one at a time. After each tentative decrement the line is
//! re-solved; the decrement is kept only if the task still fits the takt
//! and the new line is not worse than the best one so far. The first
//! rejected decrement ends the search for that task.
//!
//! # Acceptance
//!
//! | Rule | Keep when |
//! |------|-----------|
//! | Canonical | fewer stations, or equal stations and SI <= best SI |
//! | Legacy (deprecated) | stations <= best stations |

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::StationAssigner;
use crate::config::AcceptanceRule;
use crate::error::Result;
use crate::models::{BalanceResult, MachineReduction, Task};

/// Outcome of a machine reduction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineOptimization {
    /// Best line found (the initial one when nothing was accepted).
    pub result: BalanceResult,
    /// Accepted decrements, in the order they were made.
    pub reductions: Vec<MachineReduction>,
    /// Task table with the accepted machine counts.
    pub tasks: Vec<Task>,
}

impl MachineOptimization {
    /// Whether at least one machine was removed.
    pub fn improved(&self) -> bool {
        !self.reductions.is_empty()
    }

    /// Total machines removed across all tasks.
    pub fn machines_saved(&self) -> u32 {
        self.reductions
            .iter()
            .map(|r| r.from_machines - r.to_machines)
            .sum()
    }
}

impl StationAssigner {
    /// Greedily removes parallel machines while the line does not regress.
    ///
    /// `initial` must be the assignment of `tasks` at `takt_time`. The
    /// input slice is never modified; the reduced table is returned.
    #[instrument(skip_all, fields(task_count = tasks.len(), takt_time = takt_time))]
    pub fn optimize_machines(
        &self,
        tasks: &[Task],
        takt_time: f64,
        max_tasks_per_station: usize,
        initial: &BalanceResult,
    ) -> Result<MachineOptimization> {
        let mut current = tasks.to_vec();
        let mut best = initial.clone();
        let mut reductions = Vec::new();

        for i in 0..current.len() {
            while current[i].machines > 1 {
                let from = current[i].machines;
                current[i].machines = from - 1;

                if current[i].effective_time() > takt_time {
                    trace!(task = current[i].id, machines = from - 1, "reduction exceeds takt");
                    current[i].machines = from;
                    break;
                }

                let trial = self.solve(&current, takt_time, max_tasks_per_station)?;
                if !accepts(self.config().acceptance_rule, &trial, &best) {
                    trace!(
                        task = current[i].id,
                        stations = trial.station_count(),
                        si = trial.smoothness_index,
                        "reduction rejected"
                    );
                    current[i].machines = from;
                    break;
                }

                debug!(
                    task = current[i].id,
                    from,
                    to = from - 1,
                    stations = trial.station_count(),
                    si = trial.smoothness_index,
                    "reduction accepted"
                );
                reductions.push(MachineReduction {
                    task_id: current[i].id,
                    task_name: current[i].name.clone(),
                    from_machines: from,
                    to_machines: from - 1,
                });
                best = trial;
            }
        }

        Ok(MachineOptimization {
            result: best,
            reductions,
            tasks: current,
        })
    }
}

/// Reduction pass with the default configuration.
pub fn optimize_machines(
    tasks: &[Task],
    takt_time: f64,
    max_tasks_per_station: usize,
    initial: &BalanceResult,
) -> Result<MachineOptimization> {
    StationAssigner::new().optimize_machines(tasks, takt_time, max_tasks_per_station, initial)
}

#[allow(deprecated)]
fn accepts(rule: AcceptanceRule, trial: &BalanceResult, best: &BalanceResult) -> bool {
    let (n, best_n) = (trial.station_count(), best.station_count());
    match rule {
        AcceptanceRule::Canonical => {
            n < best_n || (n == best_n && trial.smoothness_index <= best.smoothness_index)
        }
        AcceptanceRule::Legacy => n <= best_n,
    }
}
