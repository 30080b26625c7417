use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use mushak_map::{FieldStatus, HeaderCheckResult, MatchKind};

use crate::types::{CheckReport, ImportResult};

pub fn print_check(report: &CheckReport) {
    println!("File: {}", report.file.display());
    println!("Rows: {}", report.rows);
    println!("{}", check_table(&report.checks));
    println!(
        "Exact: {}  Manual: {}  Missing: {}",
        report.summary.exact, report.summary.manual, report.summary.missing
    );
    println!("{}", status_line(report));
}

pub fn print_check_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize check report")?;
    println!("{json}");
    Ok(())
}

pub fn print_import(result: &ImportResult) {
    print_check(&result.check);
    if !result.check.ready {
        return;
    }
    if result.dry_run {
        println!("Dry run: {} rows projected, nothing written", result.imported);
        return;
    }
    for path in &result.outputs {
        println!("Wrote: {}", path.display());
    }
    if let Some(report) = &result.submission {
        println!(
            "Submitted {} rows to {} (HTTP {})",
            report.accepted, report.endpoint, report.status
        );
    }
    if let Some(path) = &result.saved_mapping {
        println!("Mapping: {}", path.display());
    }
    if let Some(path) = &result.saved_profile {
        println!("Profile: {}", path.display());
    }
}

/// One-line verdict shown under the check table.
pub fn status_line(report: &CheckReport) -> String {
    if report.ready {
        return format!("Ready to import {} rows", report.rows);
    }
    let missing: Vec<&str> = report
        .missing()
        .map(|check| check.expected.canonical_name())
        .collect();
    format!("Not ready: missing {}", missing.join(", "))
}

pub fn check_table(checks: &[HeaderCheckResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Found"),
        header_cell("Status"),
        header_cell("Match"),
        header_cell("Suggestion"),
        header_cell("Message"),
    ]);
    apply_check_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for check in checks {
        table.add_row(vec![
            Cell::new(check.expected.canonical_name()).add_attribute(Attribute::Bold),
            found_cell(check),
            status_cell(check.status),
            match_cell(check.match_kind),
            suggestion_cell(check),
            Cell::new(&check.message),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_check_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(13)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn found_cell(check: &HeaderCheckResult) -> Cell {
    match &check.found {
        Some(header) => Cell::new(header),
        None => dim_cell("-"),
    }
}

fn status_cell(status: FieldStatus) -> Cell {
    match status {
        FieldStatus::Ok => Cell::new(status.as_str())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        FieldStatus::Missing => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Exact => Cell::new("exact"),
        MatchKind::Manual => Cell::new("manual").fg(Color::Cyan),
        MatchKind::Unmatched => dim_cell("-"),
    }
}

fn suggestion_cell(check: &HeaderCheckResult) -> Cell {
    match (&check.suggestion, check.suggestion_distance) {
        (Some(header), Some(distance)) if !check.is_ok() => {
            Cell::new(format!("{header} ({distance})")).fg(Color::Yellow)
        }
        _ => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
