//! Report and template export.
//!
//! Reports are written as CSV: each section holds a title line, the takt
//! time, total time and efficiency, a blank line, then one row per
//! station. Several results (initial and improved line) go into one file
//! as consecutive sections.

use std::io::Write;

use csv::WriterBuilder;

use crate::analysis::LineKpi;
use crate::error::Result;
use crate::models::{BalanceResult, Station};

/// Header row of the blank import template.
pub const TEMPLATE_HEADER: [&str; 6] = ["ID", "Name", "Time", "Predecessors", "Compat_IDs", "Machines"];

/// Header row of the station table in a report.
pub const STATION_HEADER: [&str; 4] = ["Station", "Tasks", "Load (s)", "Machines"];

/// Writes the blank import template.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(TEMPLATE_HEADER)?;
    wtr.flush()?;
    Ok(())
}

/// Rows of one report section.
pub fn report_rows(result: &BalanceResult, title: &str) -> Vec<Vec<String>> {
    let kpi = LineKpi::calculate(result, 0.0);
    let mut rows = vec![
        vec![title.to_string()],
        vec!["Takt Time:".into(), format!("{:.2}s", result.takt_time)],
        vec!["Total Time:".into(), format!("{:.2}s", result.total_time)],
        vec![
            "Efficiency:".into(),
            format!("{:.1}%", kpi.efficiency_percent()),
        ],
        vec![String::new()],
        STATION_HEADER.iter().map(|h| h.to_string()).collect(),
    ];
    rows.extend(
        result
            .stations
            .iter()
            .enumerate()
            .map(|(i, station)| station_row(i + 1, station)),
    );
    rows
}

fn station_row(number: usize, station: &Station) -> Vec<String> {
    let tasks = station
        .tasks
        .iter()
        .map(|t| format!("{} ({}M)", t.task.name, t.task.machines))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        number.to_string(),
        tasks,
        format!("{:.2}", station.load),
        station.total_machines().to_string(),
    ]
}

/// Writes one or more titled results as consecutive report sections.
pub fn write_report<W: Write>(writer: W, sections: &[(&str, &BalanceResult)]) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    for (idx, (title, result)) in sections.iter().enumerate() {
        if idx > 0 {
            wtr.write_record([""])?;
        }
        for row in report_rows(result, title) {
            wtr.write_record(&row)?;
        }
    }
    wtr.flush()?;
    Ok(())
}
