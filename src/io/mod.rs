//! Table import and report export.
//!
//! The engine consumes plain `TaskRecord`s; this module is the adapter
//! between those and CSV files (or any reader that yields ordered
//! `(header, cell)` rows, via [`records_from_rows`]).

mod export;
mod import;

pub use export::{report_rows, write_report, write_template, STATION_HEADER, TEMPLATE_HEADER};
pub use import::{
    read_tasks_csv, read_tasks_csv_path, records_from_rows, Row, COMPATIBILITY_HEADERS, ID_HEADERS,
    MACHINE_HEADERS, NAME_HEADERS, PREDECESSOR_HEADERS, TIME_HEADERS,
};
