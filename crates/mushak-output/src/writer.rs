//! File exports for projected tax lines.
//!
//! All formats share the same column order so that an exported sheet can be
//! fed straight back into the importer and reconcile with exact matches only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use mushak_model::{CellValue, ProjectedRow, TaxField};

/// Worksheet name used for XLSX exports.
pub const SHEET_NAME: &str = "HS Codes";

/// Export column order with header text and XLSX column width.
pub const EXPORT_COLUMNS: [(TaxField, &str, f64); 8] = [
    (TaxField::HsCode, "HS Code", 15.0),
    (TaxField::Description, "Description", 45.0),
    (TaxField::Cd, "CD", 8.0),
    (TaxField::Sd, "SD", 8.0),
    (TaxField::Vat, "VAT", 8.0),
    (TaxField::Ait, "AIT", 8.0),
    (TaxField::Rd, "RD", 8.0),
    (TaxField::Tti, "TTI", 8.0),
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn writer(self) -> Box<dyn RowWriter> {
        match self {
            Self::Xlsx => Box::new(XlsxWriter),
            Self::Csv => Box::new(CsvWriter),
            Self::Json => Box::new(JsonWriter),
        }
    }
}

/// Writes projected rows to a file.
pub trait RowWriter {
    fn write_rows(&self, rows: &[ProjectedRow], path: &Path) -> Result<()>;
}

/// Spreadsheet export with a bold, frozen header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    fn fill_sheet(sheet: &mut Worksheet, rows: &[ProjectedRow]) -> Result<(), XlsxError> {
        sheet.set_name(SHEET_NAME)?;
        let bold = Format::new().set_bold();
        for (col, (_, header, width)) in EXPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, *header, &bold)?;
            sheet.set_column_width(col, *width)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (idx, row) in rows.iter().enumerate() {
            let sheet_row = (idx + 1) as u32;
            for (col, (field, _, _)) in EXPORT_COLUMNS.iter().enumerate() {
                let col = col as u16;
                match row.get(*field) {
                    CellValue::Text(text) => {
                        sheet.write_string(sheet_row, col, text)?;
                    }
                    CellValue::Bool(value) => {
                        sheet.write_boolean(sheet_row, col, *value)?;
                    }
                    CellValue::Empty => {}
                    other => {
                        if let Some(number) = other.as_f64() {
                            sheet.write_number(sheet_row, col, number)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl RowWriter for XlsxWriter {
    fn write_rows(&self, rows: &[ProjectedRow], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        Self::fill_sheet(sheet, rows).context("Failed to build worksheet")?;
        workbook
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "wrote xlsx export");
        Ok(())
    }
}

/// Comma-separated export with the same header row as the spreadsheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl RowWriter for CsvWriter {
    fn write_rows(&self, rows: &[ProjectedRow], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(EXPORT_COLUMNS.iter().map(|(_, header, _)| *header))?;
        for row in rows {
            writer.write_record(
                EXPORT_COLUMNS
                    .iter()
                    .map(|(field, _, _)| row.get(*field).to_string()),
            )?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "wrote csv export");
        Ok(())
    }
}

/// Pretty JSON array of projected rows, row index included.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl RowWriter for JsonWriter {
    fn write_rows(&self, rows: &[ProjectedRow], path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, rows)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        out.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "wrote json export");
        Ok(())
    }
}
