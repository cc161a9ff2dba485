//! Station and balancing result models.
//!
//! A station is an ordered group of tasks worked within one takt. A
//! `BalanceResult` is the ordered sequence of stations produced by one
//! assignment run, plus the aggregate numbers a rendering layer shows.

use serde::{Deserialize, Serialize};

use super::Task;

/// A task annotated with the values the assigner ranks by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTask {
    pub task: Task,
    /// `time / machines` at the moment of ranking.
    pub effective_time: f64,
    /// Ranked positional weight.
    pub rpw: f64,
}

impl RankedTask {
    #[inline]
    pub fn id(&self) -> u32 {
        self.task.id
    }
}

/// An ordered group of tasks sharing one workstation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Assigned tasks, in assignment order.
    pub tasks: Vec<RankedTask>,
    /// Sum of assigned effective times.
    pub load: f64,
    /// Opened as an overflow escape for a task that fits nowhere.
    /// A forced station may exceed takt time.
    pub forced: bool,
}

impl Station {
    pub fn new() -> Self {
        Self::default()
    }

    /// A station holding a single task that could not be placed normally.
    pub fn forced(task: RankedTask) -> Self {
        let load = task.effective_time;
        Self {
            tasks: vec![task],
            load,
            forced: true,
        }
    }

    /// Appends a task and adds its effective time to the load.
    pub fn push(&mut self, task: RankedTask) {
        self.load += task.effective_time;
        self.tasks.push(task);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_ids(&self) -> Vec<u32> {
        self.tasks.iter().map(RankedTask::id).collect()
    }

    /// Machines installed at this station across all its tasks.
    pub fn total_machines(&self) -> u32 {
        self.tasks.iter().map(|t| t.task.machines).sum()
    }

    /// Unused time in one takt (negative when overloaded).
    pub fn idle_time(&self, takt_time: f64) -> f64 {
        takt_time - self.load
    }
}

/// Output of one assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// Stations in line order.
    pub stations: Vec<Station>,
    /// Takt time used for this run.
    pub takt_time: f64,
    /// Sum of every task's effective time.
    pub total_time: f64,
    /// RMS deviation of station loads from takt (population form).
    pub smoothness_index: f64,
}

impl BalanceResult {
    /// Builds a result and derives the smoothness index from the stations.
    pub fn new(stations: Vec<Station>, takt_time: f64, total_time: f64) -> Self {
        let smoothness_index = smoothness_index(&stations, takt_time);
        Self {
            stations,
            takt_time,
            total_time,
            smoothness_index,
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Heaviest station load; 0 for an empty line.
    pub fn bottleneck_load(&self) -> f64 {
        self.stations.iter().map(|s| s.load).fold(0.0, f64::max)
    }

    /// Index of the station holding a task.
    pub fn station_of(&self, task_id: u32) -> Option<usize> {
        self.stations
            .iter()
            .position(|s| s.tasks.iter().any(|t| t.id() == task_id))
    }

    /// Task ids in line order.
    pub fn task_sequence(&self) -> Vec<u32> {
        self.stations.iter().flat_map(Station::task_ids).collect()
    }

    pub fn forced_station_count(&self) -> usize {
        self.stations.iter().filter(|s| s.forced).count()
    }
}

/// One accepted machine-count decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineReduction {
    pub task_id: u32,
    pub task_name: String,
    pub from_machines: u32,
    pub to_machines: u32,
}

/// `sqrt(sum((takt - load)^2) / n)`; 0 for an empty line.
pub fn smoothness_index(stations: &[Station], takt_time: f64) -> f64 {
    if stations.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = stations
        .iter()
        .map(|s| (takt_time - s.load).powi(2))
        .sum();
    (sum_sq / stations.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(id: u32, time: f64) -> RankedTask {
        RankedTask {
            task: Task::new(id).with_time(time),
            effective_time: time,
            rpw: time,
        }
    }

    fn sample_result() -> BalanceResult {
        let mut s1 = Station::new();
        s1.push(ranked(1, 6.0));
        s1.push(ranked(2, 4.0));
        let mut s2 = Station::new();
        s2.push(ranked(3, 7.0));
        BalanceResult::new(vec![s1, s2], 10.0, 17.0)
    }

    #[test]
    fn test_station_push_accumulates_load() {
        let r = sample_result();
        assert!((r.stations[0].load - 10.0).abs() < 1e-12);
        assert_eq!(r.stations[0].task_ids(), vec![1, 2]);
        assert!(!r.stations[0].forced);
    }

    #[test]
    fn test_smoothness_index() {
        let r = sample_result();
        // sqrt((0^2 + 3^2) / 2)
        assert!((r.smoothness_index - (4.5f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_smoothness_zero_when_all_full() {
        let mut s = Station::new();
        s.push(ranked(1, 10.0));
        let r = BalanceResult::new(vec![s.clone(), s], 10.0, 20.0);
        assert_eq!(r.smoothness_index, 0.0);
    }

    #[test]
    fn test_empty_result() {
        let r = BalanceResult::new(vec![], 10.0, 0.0);
        assert_eq!(r.smoothness_index, 0.0);
        assert_eq!(r.bottleneck_load(), 0.0);
        assert_eq!(r.station_count(), 0);
    }

    #[test]
    fn test_lookup_helpers() {
        let r = sample_result();
        assert_eq!(r.station_of(3), Some(1));
        assert_eq!(r.station_of(99), None);
        assert_eq!(r.task_sequence(), vec![1, 2, 3]);
        assert!((r.bottleneck_load() - 10.0).abs() < 1e-12);
        assert!((r.stations[1].idle_time(10.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_forced_station() {
        let s = Station::forced(ranked(7, 15.0));
        assert!(s.forced);
        assert_eq!(s.load, 15.0);
        assert_eq!(s.total_machines(), 1);
        assert!(s.idle_time(10.0) < 0.0);
    }
}
