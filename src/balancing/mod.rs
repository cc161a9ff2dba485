//! Station assignment and line optimizers.
//!
//! # Components
//!
//! - **`rank_tasks`**: effective time and ranked positional weight
//! - **`StationAssigner::solve`**: greedy RPW bin-packing under takt,
//!   precedence, station size and compatibility constraints
//! - **`StationAssigner::optimize_takt`**: grid sweep for the smoothest takt
//! - **`StationAssigner::optimize_machines`**: parallel machine reduction
//!
//! Every entry point is also exposed as a free function using the default
//! [`BalanceConfig`](crate::config::BalanceConfig).
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Boysen, Fliedner & Scholl (2007), "A classification of assembly line
//!   balancing problems"

mod assigner;
mod machines;
mod rpw;
mod takt;

#[cfg(test)]
pub(crate) mod testing;

pub use assigner::{check_feasibility, solve, StationAssigner};
pub use machines::{optimize_machines, MachineOptimization};
pub use rpw::rank_tasks;
pub use takt::{optimize_takt, takt_bounds, takt_grid};
