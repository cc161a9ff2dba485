//! Input validation for line balancing.
//!
//! Checks structural integrity of a task table before balancing.
//! Detects:
//! - Duplicate task IDs
//! - Predecessor references to tasks that don't exist
//! - Compatibility references to tasks that don't exist
//! - Circular precedence dependencies (DAG validation)
//!
//! The assigner itself treats an unknown predecessor as satisfied, so
//! these checks are where a mistyped id surfaces.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Task the issue was found on.
    pub task_id: u32,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task references a predecessor that doesn't exist.
    InvalidPredecessor,
    /// A task's compatibility list names a task that doesn't exist.
    InvalidCompatibility,
    /// Precedence graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, task_id: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task table.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. All predecessor references point to existing tasks
/// 3. All compatibility references point to existing tasks
/// 4. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for task in tasks {
        if !ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                task.id,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    for task in tasks {
        for pred in &task.predecessors {
            if !ids.contains(pred) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    task.id,
                    format!("Task {} references unknown predecessor {}", task.id, pred),
                ));
            }
        }
        for other in task.compatibility.iter().flatten() {
            if !ids.contains(other) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCompatibility,
                    task.id,
                    format!("Task {} lists unknown compatible task {}", task.id, other),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Nodes are visited in
/// table order so the reported task is deterministic.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    // predecessor id -> successor ids
    let mut adj: HashMap<u32, Vec<u32>> = HashMap::new();
    for task in tasks {
        for &pred in &task.predecessors {
            adj.entry(pred).or_default().push(task.id);
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for task in tasks {
        let node = task.id;
        if !visited.contains(&node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                node,
                format!("Circular dependency detected involving task {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: u32,
    adj: &HashMap<u32, Vec<u32>>,
    visited: &mut HashSet<u32>,
    in_stack: &mut HashSet<u32>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1).with_time(12.0).with_compatibility(vec![2, 3]),
            Task::new(2).with_time(8.0).with_predecessor(1).with_compatibility(vec![1]),
            Task::new(3).with_time(10.0).with_predecessor(1).with_compatibility(vec![1]),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new(1), Task::new(1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.task_id == 1));
    }

    #[test]
    fn test_invalid_predecessor() {
        let tasks = vec![Task::new(1).with_predecessor(99)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidPredecessor);
        assert!(errors[0].message.contains("99"));
    }

    #[test]
    fn test_invalid_compatibility() {
        let tasks = vec![Task::new(1).with_compatibility(vec![5])];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCompatibility));
    }

    #[test]
    fn test_cyclic_dependency() {
        // 1 → 2 → 3 → 1 (cycle)
        let tasks = vec![
            Task::new(1).with_predecessor(3),
            Task::new(2).with_predecessor(1),
            Task::new(3).with_predecessor(2),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_self_loop() {
        let tasks = vec![Task::new(1).with_predecessor(1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::CyclicDependency);
    }

    #[test]
    fn test_no_cycle_in_diamond() {
        // 1 → {2, 3} → 4
        let tasks = vec![
            Task::new(1),
            Task::new(2).with_predecessor(1),
            Task::new(3).with_predecessor(1),
            Task::new(4).with_predecessors(vec![2, 3]),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new(1).with_predecessor(7),
            Task::new(1).with_compatibility(vec![8]),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
