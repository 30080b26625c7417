//! Positional table shared by the CSV and workbook readers.

use std::collections::BTreeSet;

use tracing::warn;

use mushak_model::{CellValue, ParsedSheet, RawRow};

/// Header row plus positional data rows, before keying by header.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Cell text is kept verbatim; only the empty string reads as a missing value.
pub(crate) fn normalize_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(raw.to_string())
    }
}

impl RawTable {
    /// Key rows by header.
    ///
    /// Blank rows are dropped, short rows read as empty, and a header that
    /// appears twice keeps its first column.
    pub fn into_sheet(self) -> ParsedSheet {
        let mut seen = BTreeSet::new();
        for header in &self.headers {
            if !header.is_empty() && !seen.insert(header.as_str()) {
                warn!(header = %header, "duplicate header, first column wins");
            }
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for record in self.rows {
            if record.iter().all(CellValue::is_blank) {
                continue;
            }
            let mut cells = record.into_iter();
            let mut row = RawRow::new();
            for header in &self.headers {
                let value = cells.next().unwrap_or_default();
                row.insert_first(header.clone(), value);
            }
            rows.push(row);
        }
        ParsedSheet::new(self.headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rows_are_dropped_and_short_rows_padded() {
        let table = RawTable {
            headers: vec!["HSCode".to_string(), "VAT".to_string()],
            rows: vec![
                vec![CellValue::from("8471"), CellValue::from("15")],
                vec![CellValue::Empty, CellValue::from("")],
                vec![CellValue::from("8517")],
            ],
        };
        let sheet = table.into_sheet();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].get("VAT"), Some(&CellValue::Empty));
    }

    #[test]
    fn header_and_cell_normalization() {
        assert_eq!(normalize_header("\u{feff} HS Code "), "HS Code");
        assert_eq!(normalize_cell(""), CellValue::Empty);
        assert_eq!(normalize_cell("  "), CellValue::from("  "));
        assert_eq!(normalize_cell(" 8471 "), CellValue::from(" 8471 "));
    }
}
