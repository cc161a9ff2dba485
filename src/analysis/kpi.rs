//! Line quality metrics (KPIs).
//!
//! Computes standard line balancing indicators from a completed
//! assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Stations (n) | Number of stations |
//! | Efficiency | total time / (n * takt) |
//! | Balance Delay | 1 - efficiency |
//! | Idle Time | n * takt - total time |
//! | Smoothness Index | sqrt(sum((takt - load)^2) / n) |
//! | Max Queue | round(SI * variance * 10), pieces |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2

use serde::{Deserialize, Serialize};

use crate::models::BalanceResult;

/// Multiplier turning smoothness times variance into a buffer size.
const QUEUE_FACTOR: f64 = 10.0;

/// Line performance indicators.
///
/// Time values are in seconds; ratios in `0.0..=1.0` for a line that
/// respects takt (forced stations can push efficiency above 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineKpi {
    pub station_count: usize,
    pub takt_time: f64,
    pub total_time: f64,
    /// Fraction of installed station time spent working.
    pub efficiency: f64,
    pub balance_delay: f64,
    pub idle_time: f64,
    pub smoothness_index: f64,
    /// Heaviest station load.
    pub bottleneck_load: f64,
    /// Estimated buffer in front of the bottleneck (pieces).
    pub max_queue: u64,
    /// Machines installed across the line.
    pub total_machines: u32,
    pub forced_stations: usize,
}

impl LineKpi {
    /// Computes KPIs for a result and a variability fraction.
    pub fn calculate(result: &BalanceResult, variance_fraction: f64) -> Self {
        let n = result.station_count();
        let capacity = n as f64 * result.takt_time;

        let efficiency = if capacity > 0.0 {
            result.total_time / capacity
        } else {
            0.0
        };
        let max_queue = (result.smoothness_index * variance_fraction * QUEUE_FACTOR)
            .round()
            .max(0.0) as u64;

        Self {
            station_count: n,
            takt_time: result.takt_time,
            total_time: result.total_time,
            efficiency,
            balance_delay: if n == 0 { 0.0 } else { 1.0 - efficiency },
            idle_time: capacity - result.total_time,
            smoothness_index: result.smoothness_index,
            bottleneck_load: result.bottleneck_load(),
            max_queue,
            total_machines: result.stations.iter().map(|s| s.total_machines()).sum(),
            forced_stations: result.forced_station_count(),
        }
    }

    /// Efficiency as a percentage, as shown on reports.
    pub fn efficiency_percent(&self) -> f64 {
        self.efficiency * 100.0
    }

    /// Whether the line meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_efficiency: f64, max_smoothness: f64) -> bool {
        self.efficiency >= min_efficiency && self.smoothness_index <= max_smoothness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancing::solve;
    use crate::models::Task;

    fn sample() -> BalanceResult {
        // Stations: [1] 10, [2] 8, [3] 6
        solve(
            &[
                Task::new(1).with_time(10.0),
                Task::new(2).with_time(8.0).with_predecessor(1),
                Task::new(3).with_time(12.0).with_machines(2).with_predecessor(1),
            ],
            10.0,
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = LineKpi::calculate(&sample(), 0.1);
        assert_eq!(kpi.station_count, 3);
        assert!((kpi.efficiency - 0.8).abs() < 1e-10); // 24 / 30
        assert!((kpi.balance_delay - 0.2).abs() < 1e-10);
        assert!((kpi.idle_time - 6.0).abs() < 1e-10);
        assert!((kpi.efficiency_percent() - 80.0).abs() < 1e-9);
        assert!((kpi.bottleneck_load - 10.0).abs() < 1e-10);
        assert_eq!(kpi.total_machines, 4);
        assert_eq!(kpi.forced_stations, 0);
    }

    #[test]
    fn test_kpi_max_queue() {
        let kpi = LineKpi::calculate(&sample(), 0.1);
        // SI = sqrt(20/3) = 2.58; 2.58 * 0.1 * 10 -> 3
        assert_eq!(kpi.max_queue, 3);
        assert_eq!(LineKpi::calculate(&sample(), 0.0).max_queue, 0);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = LineKpi::calculate(&BalanceResult::new(vec![], 10.0, 0.0), 0.2);
        assert_eq!(kpi.station_count, 0);
        assert_eq!(kpi.efficiency, 0.0);
        assert_eq!(kpi.balance_delay, 0.0);
        assert_eq!(kpi.max_queue, 0);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = LineKpi::calculate(&sample(), 0.1);
        assert!(kpi.meets_thresholds(0.8, 3.0));
        assert!(!kpi.meets_thresholds(0.85, 3.0));
        assert!(!kpi.meets_thresholds(0.5, 2.0));
    }
}
