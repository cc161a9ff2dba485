//! Ranked positional weight.
//!
//! RPW orders tasks for station filling: a task that has a lot of work
//! waiting behind it is placed early. The weight is the task's own
//! effective time plus the effective time of its successors.
//!
//! `RpwMode::DirectSuccessors` counts only tasks that list this task as a
//! predecessor. `RpwMode::AllSuccessors` walks the whole successor tree,
//! which is the classical definition.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique"

use std::collections::{HashMap, HashSet};

use crate::config::RpwMode;
use crate::models::{RankedTask, Task};

/// Annotates each task with effective time and RPW, keeping input order.
pub fn rank_tasks(tasks: &[Task], mode: RpwMode) -> Vec<RankedTask> {
    // id -> indices of tasks naming it as a predecessor
    let mut successors: HashMap<u32, Vec<usize>> = HashMap::new();
    for (idx, task) in tasks.iter().enumerate() {
        let mut seen = HashSet::new();
        for &pred in &task.predecessors {
            if seen.insert(pred) {
                successors.entry(pred).or_default().push(idx);
            }
        }
    }

    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let effective_time = task.effective_time();
            let downstream: f64 = match mode {
                RpwMode::DirectSuccessors => successors
                    .get(&task.id)
                    .map(|succ| succ.iter().map(|&s| tasks[s].effective_time()).sum())
                    .unwrap_or(0.0),
                RpwMode::AllSuccessors => all_successors(idx, tasks, &successors)
                    .into_iter()
                    .map(|s| tasks[s].effective_time())
                    .sum(),
            };
            RankedTask {
                task: task.clone(),
                effective_time,
                rpw: effective_time + downstream,
            }
        })
        .collect()
}

/// Indices of every task reachable through successor links, excluding
/// the start task itself. Terminates on cyclic input.
fn all_successors(
    start: usize,
    tasks: &[Task],
    successors: &HashMap<u32, Vec<usize>>,
) -> Vec<usize> {
    let mut visited = HashSet::new();
    let mut stack = vec![start];
    let mut out = Vec::new();

    while let Some(node) = stack.pop() {
        if let Some(next) = successors.get(&tasks[node].id) {
            for &s in next {
                if s != start && visited.insert(s) {
                    out.push(s);
                    stack.push(s);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 -> 2 -> 3, and 1 -> 4
    fn chain() -> Vec<Task> {
        vec![
            Task::new(1).with_time(5.0),
            Task::new(2).with_time(4.0).with_predecessor(1),
            Task::new(3).with_time(3.0).with_predecessor(2),
            Task::new(4).with_time(2.0).with_predecessor(1),
        ]
    }

    #[test]
    fn test_direct_successors_only() {
        let ranked = rank_tasks(&chain(), RpwMode::DirectSuccessors);
        // Task 1: 5 + (4 + 2); task 3 is not a direct successor
        assert!((ranked[0].rpw - 11.0).abs() < 1e-12);
        assert!((ranked[1].rpw - 7.0).abs() < 1e-12);
        assert!((ranked[2].rpw - 3.0).abs() < 1e-12);
        assert!((ranked[3].rpw - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_successors() {
        let ranked = rank_tasks(&chain(), RpwMode::AllSuccessors);
        assert!((ranked[0].rpw - 14.0).abs() < 1e-12);
        assert!((ranked[1].rpw - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_descendant_counted_once() {
        // 1 -> {2, 3} -> 4
        let tasks = vec![
            Task::new(1).with_time(1.0),
            Task::new(2).with_time(1.0).with_predecessor(1),
            Task::new(3).with_time(1.0).with_predecessor(1),
            Task::new(4).with_time(10.0).with_predecessors(vec![2, 3]),
        ];
        let ranked = rank_tasks(&tasks, RpwMode::AllSuccessors);
        assert!((ranked[0].rpw - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_effective_time_uses_machines() {
        let tasks = vec![
            Task::new(1).with_time(10.0).with_machines(2),
            Task::new(2).with_time(9.0).with_machines(3).with_predecessor(1),
        ];
        let ranked = rank_tasks(&tasks, RpwMode::DirectSuccessors);
        assert!((ranked[0].effective_time - 5.0).abs() < 1e-12);
        assert!((ranked[0].rpw - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_predecessor_counted_once() {
        let tasks = vec![
            Task::new(1).with_time(1.0),
            Task::new(2).with_time(2.0).with_predecessors(vec![1, 1]),
        ];
        let ranked = rank_tasks(&tasks, RpwMode::DirectSuccessors);
        assert!((ranked[0].rpw - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_terminates() {
        let tasks = vec![
            Task::new(1).with_time(1.0).with_predecessor(2),
            Task::new(2).with_time(2.0).with_predecessor(1),
        ];
        let ranked = rank_tasks(&tasks, RpwMode::AllSuccessors);
        assert!((ranked[0].rpw - 3.0).abs() < 1e-12);
        assert!((ranked[1].rpw - 3.0).abs() < 1e-12);
    }
}
