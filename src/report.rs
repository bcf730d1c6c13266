//! Version mapping summary table
//!
//! Renders the resolved target → tag mapping as a Markdown table, one row
//! per target series in ascending order, with the shared SQLite version in
//! the last column. Pure formatting; printing is the orchestrator's job.

use std::collections::BTreeMap;

use crate::fetch::SqliteRelease;
use crate::resolver::{ResolvedTag, TargetVersion};

const HEADERS: [&str; 3] = ["Python version", "CPython tag", "SQLite version"];

/// Render the summary table, framed by blank lines
pub fn version_table(
    resolved: &BTreeMap<TargetVersion, ResolvedTag>,
    sqlite: &SqliteRelease,
) -> String {
    let rows: Vec<[String; 3]> = resolved
        .iter()
        .map(|(target, pick)| {
            [
                target.to_string(),
                pick.tag.clone(),
                sqlite.version.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 3] = [HEADERS[0].len(), HEADERS[1].len(), HEADERS[2].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::from("\n|");
    for (header, width) in HEADERS.iter().zip(widths) {
        output.push_str(&format!(" {header:<width$} |"));
    }

    output.push_str("\n|");
    for width in widths {
        output.push(':');
        output.push_str(&"-".repeat(width + 1));
        output.push('|');
    }

    for row in &rows {
        output.push_str("\n|");
        for (cell, width) in row.iter().zip(widths) {
            output.push_str(&format!(" {cell:<width$} |"));
        }
    }

    // One blank line on each side of the table
    output.push_str("\n\n");
    output
}
