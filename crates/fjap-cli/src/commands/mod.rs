//! CLI command implementations
//!
//! One module per resource, each with a `run` function that calls the API
//! client and prints either a table or the raw JSON payload.

pub mod classes;
pub mod grades;
pub mod levels;
pub mod mark_report;
pub mod semesters;
pub mod service;
pub mod students;
pub mod subjects;

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use fjap_common::{LookupItem, RecordStatus};
use serde::Serialize;

use crate::api::PaginationMetadata;
use crate::error::Result;
use crate::OutputFormat;

/// Table with the house style and the given header
pub(crate) fn new_table<I, T>(header: I) -> Table
where
    I: IntoIterator<Item = T>,
    T: Into<Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

/// Two-column field/value table for detail views
pub(crate) fn detail_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).fg(Color::Cyan), Cell::new(value)]);
    }
    table
}

pub(crate) fn status_cell(status: RecordStatus) -> Cell {
    let color = if status.is_active() {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(status).fg(color)
}

pub(crate) fn lookup_table(items: &[LookupItem]) -> Table {
    let mut table = new_table(vec!["ID", "Name"]);
    for item in items {
        table.add_row(vec![item.id.to_string(), item.name.clone()]);
    }
    table
}

pub(crate) fn pagination_footer(meta: &PaginationMetadata) -> String {
    format!(
        "Page {} of {} ({} total)",
        meta.page,
        meta.pages.max(1),
        meta.total
    )
}

/// Print `value` as pretty JSON or through `render`
pub(crate) fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", render(value)),
    }
    Ok(())
}

/// Print a server acknowledgement
pub(crate) fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub(crate) fn print_empty(what: &str) {
    println!("{}", format!("No {} found.", what).yellow());
}
