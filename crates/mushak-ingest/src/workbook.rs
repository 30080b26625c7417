use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};
use tracing::debug;

use mushak_model::CellValue;

use crate::error::{IngestError, Result};
use crate::table::{RawTable, normalize_cell, normalize_header};

/// Read the first worksheet of an Excel or OpenDocument workbook.
pub fn read_workbook_table(path: &Path) -> Result<RawTable> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|err| workbook_error(err.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    debug!(sheet = %sheet_name, "reading first worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| workbook_error(format!("worksheet '{sheet_name}' is unreadable")))?
        .map_err(|err| workbook_error(err.to_string()))?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(RawTable::default());
    };
    let headers = header_row
        .iter()
        .map(|cell| normalize_header(&cell_text(cell)))
        .collect();
    let rows = rows_iter
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    Ok(RawTable { headers, rows })
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        _ => cell.to_string(),
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(value) => CellValue::Integer(*value),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::String(value) => normalize_cell(value),
        other => normalize_cell(&other.to_string()),
    }
}
