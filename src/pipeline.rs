//! Balancing run orchestration.
//!
//! One synchronous pass over a task table:
//!
//! 1. Normalize raw records into tasks.
//! 2. Validate run parameters and the table structure.
//! 3. Reject tasks whose cycle time exceeds takt.
//! 4. Solve the initial line.
//! 5. `Fixed` mode: reduce machines. `Auto` mode: sweep takt.
//! 6. Compute KPIs and shift output for every produced line.
//!
//! All results are returned in a `BalanceReport`; nothing is cached
//! between runs.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analysis::{simulate_output, LineKpi, SimulationResult};
use crate::balancing::{check_feasibility, StationAssigner};
use crate::config::{BalanceConfig, BalanceMode, RunParameters};
use crate::error::{BalanceError, Result};
use crate::models::{normalize_records, BalanceResult, MachineReduction, Task, TaskRecord};
use crate::validation::validate_tasks;

/// A balanced line together with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedLine {
    pub result: BalanceResult,
    pub kpi: LineKpi,
    pub simulation: SimulationResult,
}

impl EvaluatedLine {
    fn evaluate(result: BalanceResult, params: &RunParameters) -> Self {
        let kpi = LineKpi::calculate(&result, params.variance_fraction);
        let simulation = simulate_output(
            &result,
            params.shift_duration_seconds,
            params.variance_fraction,
        );
        Self {
            result,
            kpi,
            simulation,
        }
    }
}

/// Everything one balancing run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub mode: BalanceMode,
    /// Normalized input table.
    pub tasks: Vec<Task>,
    /// Line at the requested takt with the given machine counts.
    pub initial: EvaluatedLine,
    /// `Fixed` mode: line after machine reduction, when any was accepted.
    pub improved: Option<EvaluatedLine>,
    /// `Fixed` mode: accepted reductions.
    pub reductions: Vec<MachineReduction>,
    /// `Auto` mode: smoothest line over the takt sweep.
    pub auto: Option<EvaluatedLine>,
}

impl BalanceReport {
    /// The line a user should act on: improved, then auto, then initial.
    pub fn best(&self) -> &EvaluatedLine {
        self.improved
            .as_ref()
            .or(self.auto.as_ref())
            .unwrap_or(&self.initial)
    }
}

/// Runs a full balancing pass from raw table records.
#[instrument(skip_all, fields(rows = records.len(), mode = ?mode))]
pub fn run_balancing(
    records: &[TaskRecord],
    params: &RunParameters,
    mode: BalanceMode,
    config: &BalanceConfig,
) -> Result<BalanceReport> {
    let tasks = normalize_records(records);
    balance_tasks(tasks, params, mode, config)
}

/// Runs a full balancing pass on already normalized tasks.
pub fn balance_tasks(
    tasks: Vec<Task>,
    params: &RunParameters,
    mode: BalanceMode,
    config: &BalanceConfig,
) -> Result<BalanceReport> {
    if tasks.is_empty() {
        return Err(BalanceError::EmptyTaskList);
    }
    params.validate()?;
    config.validate()?;
    validate_tasks(&tasks).map_err(BalanceError::Validation)?;
    check_feasibility(&tasks, params.takt_time)?;

    let assigner = StationAssigner::new().with_config(config.clone());
    let takt = params.takt_time;
    let cap = params.max_tasks_per_station;

    let initial = assigner.solve(&tasks, takt, cap)?;
    info!(
        stations = initial.station_count(),
        si = initial.smoothness_index,
        "initial line balanced"
    );

    let mut improved = None;
    let mut reductions = Vec::new();
    let mut auto = None;

    match mode {
        BalanceMode::Fixed => {
            let outcome = assigner.optimize_machines(&tasks, takt, cap, &initial)?;
            if outcome.improved() {
                info!(
                    reductions = outcome.reductions.len(),
                    stations = outcome.result.station_count(),
                    "machine reduction improved line"
                );
                improved = Some(EvaluatedLine::evaluate(outcome.result, params));
            }
            reductions = outcome.reductions;
        }
        BalanceMode::Auto => {
            if let Some(best) = assigner.optimize_takt(&tasks, cap)? {
                info!(takt = best.takt_time, si = best.smoothness_index, "takt sweep done");
                auto = Some(EvaluatedLine::evaluate(best, params));
            }
        }
    }

    Ok(BalanceReport {
        mode,
        tasks,
        initial: EvaluatedLine::evaluate(initial, params),
        improved,
        reductions,
        auto,
    })
}
