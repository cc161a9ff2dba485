//! Line balancing domain models.
//!
//! Provides the core data types for describing an assembly line's work
//! elements and the station layouts produced for them.
//!
//! # Terms
//!
//! | u-balance | Meaning |
//! |-----------|---------|
//! | Task | Indivisible work element with time, machines, precedence |
//! | TaskRecord | Raw table row, before normalization |
//! | RankedTask | Task plus effective time and positional weight |
//! | Station | Group of tasks worked within one takt |
//! | BalanceResult | Ordered stations of one assignment run |

mod station;
mod task;

pub use station::{smoothness_index, BalanceResult, MachineReduction, RankedTask, Station};
pub use task::{normalize_records, parse_id_list, Task, TaskRecord};

pub(crate) use task::parse_leading_int;
