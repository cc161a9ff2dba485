//! Ranked positional weight station assigner.
//!
//! # Algorithm
//!
//! 1. Rank every task (effective time, RPW).
//! 2. Open an empty station.
//! 3. Candidates are unassigned tasks whose predecessors all sit in
//!    already closed stations, that fit the remaining takt (with
//!    tolerance), that keep the station under its task cap, and that are
//!    compatible with every task already in the station (both directions).
//! 4. Add the highest-RPW candidate (stable on ties), recompute, repeat
//!    until nothing fits, then close the station.
//! 5. If a fresh station has no candidate at all, the highest-RPW ready
//!    task is forced into a station of its own so the run always
//!    advances. No ready task means a precedence cycle.
//!
//! # Complexity
//! O(n^2 * k) per run where n = tasks, k = tasks per station.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique"

use tracing::{debug, instrument, trace, warn};

use super::rpw::rank_tasks;
use crate::config::{BalanceConfig, FEASIBILITY_TOLERANCE};
use crate::error::{BalanceError, Result};
use crate::models::{BalanceResult, RankedTask, Station, Task};

/// Greedy RPW bin-packing of tasks into stations.
///
/// # Example
///
/// ```
/// use u_balance::balancing::StationAssigner;
/// use u_balance::models::Task;
///
/// let tasks = vec![
///     Task::new(1).with_time(10.0),
///     Task::new(2).with_time(8.0).with_predecessor(1),
///     Task::new(3).with_time(6.0).with_predecessor(1),
/// ];
/// let result = StationAssigner::new().solve(&tasks, 10.0, 2).unwrap();
/// assert_eq!(result.station_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationAssigner {
    config: BalanceConfig,
}

impl StationAssigner {
    /// Creates an assigner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: BalanceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Partitions `tasks` into ordered stations.
    ///
    /// The input slice is never modified. A task whose effective time alone
    /// exceeds `takt_time` ends up in a forced station; use
    /// [`check_feasibility`] first to reject such inputs.
    ///
    /// # Errors
    /// `PrecedenceCycle` when unassigned tasks remain but none is ready.
    #[instrument(
        skip_all,
        fields(task_count = tasks.len(), takt_time = takt_time, max_tasks = max_tasks_per_station)
    )]
    pub fn solve(
        &self,
        tasks: &[Task],
        takt_time: f64,
        max_tasks_per_station: usize,
    ) -> Result<BalanceResult> {
        let mut unassigned = rank_tasks(tasks, self.config.rpw_mode);
        let mut stations: Vec<Station> = Vec::new();

        while !unassigned.is_empty() {
            let mut station = Station::new();
            let mut candidates =
                self.candidates(&unassigned, &station, takt_time, max_tasks_per_station);

            if candidates.is_empty() {
                let Some(idx) = best_ready(&unassigned) else {
                    let ids: Vec<u32> = unassigned.iter().map(RankedTask::id).collect();
                    warn!(unassigned = ?ids, "no ready task, precedence cycle");
                    return Err(BalanceError::PrecedenceCycle { unassigned: ids });
                };
                let task = unassigned.remove(idx);
                debug!(
                    station = stations.len() + 1,
                    task = task.id(),
                    load = task.effective_time,
                    "forced station"
                );
                stations.push(Station::forced(task));
                continue;
            }

            while let Some(&best) = candidates.first() {
                let task = unassigned.remove(best);
                trace!(task = task.id(), rpw = task.rpw, "assigned");
                station.push(task);
                candidates =
                    self.candidates(&unassigned, &station, takt_time, max_tasks_per_station);
            }

            debug!(
                station = stations.len() + 1,
                tasks = ?station.task_ids(),
                load = station.load,
                "station closed"
            );
            stations.push(station);
        }

        let total_time = tasks.iter().map(Task::effective_time).sum();
        Ok(BalanceResult::new(stations, takt_time, total_time))
    }

    /// Indices into `unassigned` that may join `station`, best RPW first.
    fn candidates(
        &self,
        unassigned: &[RankedTask],
        station: &Station,
        takt_time: f64,
        max_tasks_per_station: usize,
    ) -> Vec<usize> {
        if station.task_count() >= max_tasks_per_station {
            return Vec::new();
        }
        let limit = takt_time + self.config.epsilon;

        let mut found: Vec<usize> = unassigned
            .iter()
            .enumerate()
            .filter(|(_, t)| is_ready(t, unassigned) && !follows_station(t, station))
            .filter(|(_, t)| station.load + t.effective_time <= limit)
            .filter(|(_, t)| {
                station
                    .tasks
                    .iter()
                    .all(|s| s.task.is_compatible_with(&t.task))
            })
            .map(|(i, _)| i)
            .collect();

        // Stable: equal RPW keeps input order.
        found.sort_by(|&a, &b| unassigned[b].rpw.total_cmp(&unassigned[a].rpw));
        found
    }
}

/// Solves with the default configuration.
pub fn solve(tasks: &[Task], takt_time: f64, max_tasks_per_station: usize) -> Result<BalanceResult> {
    StationAssigner::new().solve(tasks, takt_time, max_tasks_per_station)
}

/// Rejects tasks whose effective time exceeds `takt_time`.
///
/// Runs before any station is created. All offending tasks are reported
/// together.
pub fn check_feasibility(tasks: &[Task], takt_time: f64) -> Result<()> {
    let offending: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.effective_time() > takt_time + FEASIBILITY_TOLERANCE)
        .collect();

    if offending.is_empty() {
        return Ok(());
    }
    warn!(count = offending.len(), takt_time, "tasks exceed takt time");
    Err(BalanceError::InfeasibleTask {
        ids: offending.iter().map(|t| t.id).collect(),
        names: offending.iter().map(|t| t.name.clone()).collect(),
        takt_time,
    })
}

/// A predecessor id that names no unassigned task counts as satisfied.
fn is_ready(task: &RankedTask, unassigned: &[RankedTask]) -> bool {
    task.task
        .predecessors
        .iter()
        .all(|p| !unassigned.iter().any(|u| u.id() == *p))
}

/// Whether `task` has a predecessor in the station being filled.
fn follows_station(task: &RankedTask, station: &Station) -> bool {
    task.task
        .predecessors
        .iter()
        .any(|p| station.tasks.iter().any(|s| s.id() == *p))
}

/// Highest-RPW ready task, first in input order on ties.
fn best_ready(unassigned: &[RankedTask]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, task) in unassigned.iter().enumerate() {
        if !is_ready(task, unassigned) {
            continue;
        }
        if best.map_or(true, |b| task.rpw > unassigned[b].rpw) {
            best = Some(idx);
        }
    }
    best
}
