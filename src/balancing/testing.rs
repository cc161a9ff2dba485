//! Random line generation and assignment invariant checks for tests.

use std::collections::HashSet;

use rand::Rng;
use tracing_subscriber::{fmt, EnvFilter};

use crate::models::{BalanceResult, Task};

/// Routes engine logs to the test harness output (`RUST_LOG` or debug).
pub(crate) fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Random acyclic task table: predecessors only point to lower ids.
pub(crate) fn random_tasks<R: Rng>(rng: &mut R, n: u32) -> Vec<Task> {
    (1..=n)
        .map(|id| {
            let mut task = Task::new(id)
                .with_time(f64::from(rng.random_range(1..=12u32)))
                .with_machines(rng.random_range(1..=3));
            for pred in 1..id {
                if rng.random_bool(0.25) {
                    task = task.with_predecessor(pred);
                }
            }
            if rng.random_bool(0.2) {
                let compat = (1..=n)
                    .filter(|&other| other != id && rng.random_bool(0.5))
                    .collect();
                task = task.with_compatibility(compat);
            }
            task
        })
        .collect()
}

/// Asserts partition, precedence, fit, cap and compatibility.
pub(crate) fn assert_valid_assignment(
    result: &BalanceResult,
    tasks: &[Task],
    max_tasks_per_station: usize,
    epsilon: f64,
) {
    let mut seen = HashSet::new();
    for id in result.task_sequence() {
        assert!(seen.insert(id), "task {id} assigned twice");
    }
    let expected: HashSet<u32> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(seen, expected, "stations must hold exactly the input tasks");

    for (idx, station) in result.stations.iter().enumerate() {
        assert!(!station.is_empty(), "station {idx} is empty");
        if station.forced {
            assert_eq!(station.task_count(), 1);
        } else {
            assert!(station.load <= result.takt_time + epsilon + 1e-9);
            assert!(station.task_count() <= max_tasks_per_station);
        }

        for member in &station.tasks {
            for pred in &member.task.predecessors {
                if let Some(pred_station) = result.station_of(*pred) {
                    assert!(
                        pred_station < idx,
                        "task {} in station {idx} precedes its predecessor {pred}",
                        member.id()
                    );
                }
            }
            for other in &station.tasks {
                if other.id() != member.id() {
                    assert!(member.task.is_compatible_with(&other.task));
                }
            }
        }
    }
    assert!(result.smoothness_index >= 0.0);
}
