use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::table::{RawTable, normalize_cell, normalize_header};

/// Read a CSV file; row 1 is the header row.
///
/// Cells stay text, so numeric-looking values are not coerced.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut records = reader.records();
    let Some(first) = records.next() else {
        return Ok(RawTable::default());
    };
    let headers: Vec<String> = first.map_err(csv_error)?.iter().map(normalize_header).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(RawTable { headers, rows })
}
