//! Spreadsheet ingestion for tax-line imports.
//!
//! Reads the first sheet of a CSV or workbook file into a [`ParsedSheet`]:
//! headers from row 1, header-keyed rows from row 2 on, blank rows removed.

pub mod csv_table;
pub mod error;
pub mod table;
pub mod workbook;

use std::path::Path;

use tracing::info;

use mushak_model::ParsedSheet;

pub use csv_table::read_csv_table;
pub use error::{IngestError, Result};
pub use table::RawTable;
pub use workbook::read_workbook_table;

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Read `path` into a header-keyed sheet.
pub fn read_sheet(path: &Path) -> Result<ParsedSheet> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = SheetFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let table = match format {
        SheetFormat::Csv => read_csv_table(path)?,
        SheetFormat::Workbook => read_workbook_table(path)?,
    };
    let sheet = table.into_sheet();
    info!(
        path = %path.display(),
        headers = sheet.headers.len(),
        rows = sheet.rows.len(),
        "sheet read"
    );
    Ok(sheet)
}
