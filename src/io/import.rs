//! Task table import.
//!
//! Turns spreadsheet-like rows (header -> cell text) into `TaskRecord`s.
//! Header matching is trimmed and case-insensitive against a synonym list
//! per field, so both the English template and the Vietnamese form
//! headers are accepted. When several columns match a field, the
//! leftmost one wins. Cell values are passed through untouched;
//! interpretation happens in `Task::from_record`.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{BalanceError, Result};
use crate::models::{parse_leading_int, TaskRecord};

pub const ID_HEADERS: &[&str] = &["id", "stt"];
pub const NAME_HEADERS: &[&str] = &["name", "tên công việc", "tên", "job"];
pub const TIME_HEADERS: &[&str] = &["time", "thời gian (s)", "thời gian", "giây"];
pub const PREDECESSOR_HEADERS: &[&str] = &["predecessors", "id trước (pred)", "pred", "trước"];
pub const COMPATIBILITY_HEADERS: &[&str] = &["compat_ids", "id ghép chung", "compat", "ghép"];
pub const MACHINE_HEADERS: &[&str] = &["machines", "số máy", "máy"];

/// One table row as `(header, cell)` pairs in column order.
pub type Row = Vec<(String, String)>;

/// Maps parsed rows to task records.
///
/// Fully blank rows are skipped. The id comes from an id column when it
/// holds a positive integer, otherwise from the 1-based row number.
pub fn records_from_rows(rows: &[Row]) -> Vec<TaskRecord> {
    rows.iter()
        .filter(|row| row.iter().any(|(_, v)| !v.trim().is_empty()))
        .enumerate()
        .map(|(idx, row)| {
            let row_number = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            let id = lookup(row, ID_HEADERS)
                .and_then(parse_leading_int)
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(row_number);

            TaskRecord {
                id,
                name: lookup(row, NAME_HEADERS).unwrap_or_default().to_string(),
                time: lookup(row, TIME_HEADERS).unwrap_or_default().to_string(),
                predecessors: lookup(row, PREDECESSOR_HEADERS)
                    .unwrap_or_default()
                    .to_string(),
                compatibility: lookup(row, COMPATIBILITY_HEADERS)
                    .unwrap_or_default()
                    .to_string(),
                machines: lookup(row, MACHINE_HEADERS).unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// Leftmost cell whose header matches one of `synonyms`, in synonym order.
fn lookup<'a>(row: &'a [(String, String)], synonyms: &[&str]) -> Option<&'a str> {
    synonyms.iter().find_map(|syn| {
        row.iter()
            .find(|(header, _)| header.trim().to_lowercase() == *syn)
            .map(|(_, value)| value.as_str())
    })
}

/// Reads a CSV task table (first line is the header).
pub fn read_tasks_csv<R: std::io::Read>(reader: R) -> Result<Vec<TaskRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    let records = records_from_rows(&rows);
    if records.is_empty() {
        return Err(BalanceError::Import("table has no task rows".into()));
    }
    debug!(rows = records.len(), "task table imported");
    Ok(records)
}

/// Reads a CSV task table from disk.
pub fn read_tasks_csv_path(path: impl AsRef<Path>) -> Result<Vec<TaskRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_tasks_csv(file)
}
