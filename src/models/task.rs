//! Task (work element) model.
//!
//! A task is an indivisible work element on an assembly line. It has a
//! processing time, a number of parallel machines sharing that time, a
//! set of predecessor tasks and an optional compatibility list naming the
//! tasks it may share a station with.
//!
//! # Normalization
//!
//! Tables edited by hand are tolerated: `TaskRecord` holds the raw cell
//! text and `Task::from_record` degrades anything unparseable to a default
//! (time 0, one machine, non-numeric list entries dropped) instead of
//! failing.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique"

use serde::{Deserialize, Serialize};

/// A task to be assigned to a station.
///
/// Immutable once solving starts; solvers work on their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique positive identifier.
    pub id: u32,
    /// Display label (not required to be unique).
    pub name: String,
    /// Total processing time (seconds), `>= 0`.
    pub time: f64,
    /// Parallel machines sharing the work, `>= 1`.
    pub machines: u32,
    /// Tasks that must sit in an earlier station.
    pub predecessors: Vec<u32>,
    /// Tasks this one may share a station with. `None` = any task.
    pub compatibility: Option<Vec<u32>>,
}

impl Task {
    /// Creates a task with zero time and a single machine.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("Task {id}"),
            time: 0.0,
            machines: 1,
            predecessors: Vec::new(),
            compatibility: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the processing time (seconds).
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Sets the parallel machine count (clamped to at least 1).
    pub fn with_machines(mut self, machines: u32) -> Self {
        self.machines = machines.max(1);
        self
    }

    /// Adds a predecessor.
    pub fn with_predecessor(mut self, id: u32) -> Self {
        self.predecessors.push(id);
        self
    }

    /// Replaces the predecessor list.
    pub fn with_predecessors(mut self, ids: Vec<u32>) -> Self {
        self.predecessors = ids;
        self
    }

    /// Restricts station sharing to the given tasks.
    pub fn with_compatibility(mut self, ids: Vec<u32>) -> Self {
        self.compatibility = Some(ids);
        self
    }

    /// Per-unit cycle contribution: `time / machines`.
    #[inline]
    pub fn effective_time(&self) -> f64 {
        self.time / f64::from(self.machines.max(1))
    }

    /// Whether this task's own compatibility list admits `other`.
    #[inline]
    pub fn allows(&self, other: u32) -> bool {
        self.compatibility
            .as_ref()
            .map_or(true, |ids| ids.contains(&other))
    }

    /// Symmetric compatibility: both tasks must admit each other.
    #[inline]
    pub fn is_compatible_with(&self, other: &Task) -> bool {
        self.allows(other.id) && other.allows(self.id)
    }

    /// Builds a task from raw table cells, degrading bad values to defaults.
    pub fn from_record(record: &TaskRecord) -> Self {
        let time = parse_leading_float(&record.time)
            .filter(|t| *t >= 0.0)
            .unwrap_or(0.0);
        let machines = parse_leading_int(&record.machines)
            .filter(|m| *m >= 1)
            .map(|m| u32::try_from(m).unwrap_or(u32::MAX))
            .unwrap_or(1);
        let compatibility = if record.compatibility.is_empty() {
            None
        } else {
            Some(parse_id_list(&record.compatibility))
        };
        let name = if record.name.trim().is_empty() {
            format!("Task {}", record.id)
        } else {
            record.name.clone()
        };

        Self {
            id: record.id,
            name,
            time,
            machines,
            predecessors: parse_id_list(&record.predecessors),
            compatibility,
        }
    }
}

/// One raw row of the task table, as text.
///
/// This is the shape the import adapter and form readers hand over;
/// no value has been interpreted yet except the row id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    pub id: u32,
    pub name: String,
    pub time: String,
    /// Comma-separated predecessor ids.
    pub predecessors: String,
    /// Comma-separated compatible ids. Empty = compatible with everything;
    /// any other text, even whitespace, is parsed as a list.
    pub compatibility: String,
    pub machines: String,
}

impl TaskRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_predecessors(mut self, preds: impl Into<String>) -> Self {
        self.predecessors = preds.into();
        self
    }

    pub fn with_compatibility(mut self, compat: impl Into<String>) -> Self {
        self.compatibility = compat.into();
        self
    }

    pub fn with_machines(mut self, machines: impl Into<String>) -> Self {
        self.machines = machines.into();
        self
    }
}

/// Normalizes a whole table.
pub fn normalize_records(records: &[TaskRecord]) -> Vec<Task> {
    records.iter().map(Task::from_record).collect()
}

/// Parses `"1, 2,x,3"` into `[1, 2, 3]`; tokens without a leading
/// positive integer are dropped.
pub fn parse_id_list(text: &str) -> Vec<u32> {
    text.split(',')
        .filter_map(parse_leading_int)
        .filter_map(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .collect()
}

/// Reads the integer prefix of a cell (`"12abc"` -> 12, `"2.7"` -> 2).
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Reads the longest numeric prefix of a cell (`"12.5s"` -> 12.5).
pub(crate) fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim();
    (1..=s.len())
        .rev()
        .filter(|&end| s.is_char_boundary(end))
        .find_map(|end| {
            let prefix = &s[..end];
            // Rust accepts "inf"/"nan" words; a table cell never means those.
            if prefix.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                return None;
            }
            prefix.parse::<f64>().ok().filter(|v| v.is_finite())
        })
}
