//! Line metrics and output estimation.
//!
//! # KPI
//!
//! `LineKpi` computes efficiency, balance delay, idle time, smoothness
//! and a queue estimate for a finished assignment.
//!
//! # Output
//!
//! `simulate_output` estimates mean and 95%-safe units per shift from
//! the bottleneck station. It is a closed-form estimate, not a
//! discrete-event simulation.

mod kpi;
mod simulation;

pub use kpi::LineKpi;
pub use simulation::{simulate_output, SimulationResult, Z_95_ONE_SIDED};
