//! Shift output estimate.
//!
//! Closed-form estimate of how many units a line completes in a shift,
//! driven by the bottleneck station. The safe figure pads the bottleneck
//! cycle with a one-sided 95% margin on an assumed symmetric spread:
//!
//! ```text
//! sigma       = bottleneck * variance
//! safe_cycle  = bottleneck + 1.645 * sigma
//! mean_output = floor(shift / bottleneck)
//! safe_output = floor(shift / safe_cycle)
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::BalanceResult;

/// One-sided z-score for 95% confidence.
pub const Z_95_ONE_SIDED: f64 = 1.645;

/// Output estimate for one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Heaviest station load (seconds).
    pub bottleneck_load: f64,
    /// Units per shift at the nominal bottleneck cycle.
    pub mean_output: u64,
    /// Units per shift at the padded cycle.
    pub safe_output: u64,
    /// Spread of the bottleneck cycle (seconds).
    pub std_dev: f64,
    /// Padded bottleneck cycle (seconds).
    pub safe_cycle_time: f64,
}

/// Estimates shift output from the bottleneck station.
///
/// A line without load (no stations, or only zero-time tasks) has no
/// meaningful cycle; both outputs are reported as 0.
pub fn simulate_output(
    result: &BalanceResult,
    shift_duration_seconds: f64,
    variance_fraction: f64,
) -> SimulationResult {
    let bottleneck_load = result.bottleneck_load();
    let std_dev = bottleneck_load * variance_fraction;
    let safe_cycle_time = bottleneck_load + Z_95_ONE_SIDED * std_dev;

    if bottleneck_load <= 0.0 {
        warn!("line has no load, output estimate is zero");
        return SimulationResult {
            bottleneck_load,
            mean_output: 0,
            safe_output: 0,
            std_dev,
            safe_cycle_time,
        };
    }

    SimulationResult {
        bottleneck_load,
        mean_output: units(shift_duration_seconds, bottleneck_load),
        safe_output: units(shift_duration_seconds, safe_cycle_time),
        std_dev,
        safe_cycle_time,
    }
}

fn units(shift: f64, cycle: f64) -> u64 {
    (shift / cycle).floor().max(0.0) as u64
}
