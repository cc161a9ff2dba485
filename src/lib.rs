//! Assembly line balancing for the U-Engine ecosystem.
//!
//! Assigns work elements to ordered stations under a takt time, then
//! improves the line by sweeping takt values or removing parallel
//! machines, and estimates shift output from the bottleneck.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskRecord`, `Station`, `BalanceResult`
//! - **`balancing`**: RPW station assigner, takt sweep, machine reduction
//! - **`analysis`**: Line KPIs and shift output estimate
//! - **`validation`**: Task table integrity checks (duplicate IDs, unknown refs, cycles)
//! - **`config`**: Run parameters and engine switches
//! - **`io`**: CSV import with tolerant headers, report and template export
//! - **`pipeline`**: One-call orchestration returning a `BalanceReport`
//!
//! # Example
//!
//! ```
//! use u_balance::config::{BalanceConfig, BalanceMode, RunParameters};
//! use u_balance::models::Task;
//! use u_balance::pipeline::balance_tasks;
//!
//! let tasks = vec![
//!     Task::new(1).with_time(10.0),
//!     Task::new(2).with_time(8.0).with_predecessor(1),
//!     Task::new(3).with_time(6.0).with_predecessor(1),
//! ];
//! let params = RunParameters::new(10.0).with_max_tasks_per_station(2);
//! let report = balance_tasks(tasks, &params, BalanceMode::Fixed, &BalanceConfig::default()).unwrap();
//! assert_eq!(report.initial.result.station_count(), 3);
//! ```
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"

pub mod analysis;
pub mod balancing;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use error::{BalanceError, Result};
