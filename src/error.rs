//! Error types for line balancing.
//!
//! Malformed numeric input is never an error (it degrades to defaults
//! during normalization). Errors are reserved for runs that cannot
//! produce a trustworthy assignment.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Errors raised by the balancing engine and its adapters.
#[derive(Error, Debug)]
pub enum BalanceError {
    /// One or more tasks have an effective cycle time above the takt time.
    ///
    /// Raised before any station is created. Adding machines to the
    /// listed tasks or lowering their time resolves it.
    #[error("tasks {names:?} have cycle time above takt time {takt_time}")]
    InfeasibleTask {
        ids: Vec<u32>,
        names: Vec<String>,
        takt_time: f64,
    },

    /// Assignment stalled: unassigned tasks remain but none is ready.
    #[error("precedence cycle: no ready task among unassigned {unassigned:?}")]
    PrecedenceCycle { unassigned: Vec<u32> },

    /// A run parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Balancing was requested for an empty task table.
    #[error("task list is empty")]
    EmptyTaskList,

    /// Structural validation of the task table failed.
    #[error("task table validation failed ({} issue(s))", .0.len())]
    Validation(Vec<ValidationError>),

    /// The import adapter could not map a table.
    #[error("import failed: {0}")]
    Import(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BalanceError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
