//! Projection of raw sheet rows onto fixed-shape tax lines.

use std::collections::BTreeMap;

use mushak_model::{CellValue, MappingConfig, ProjectedRow, RawRow, TaxField, TaxLine};

/// Sheet row number of the first data row (row 1 holds the headers).
pub const FIRST_DATA_ROW: usize = 2;

/// Source of the raw header backing each field.
pub trait FieldLookup {
    fn header_for(&self, field: TaxField) -> Option<&str>;
}

impl FieldLookup for BTreeMap<TaxField, String> {
    fn header_for(&self, field: TaxField) -> Option<&str> {
        self.get(&field).map(String::as_str)
    }
}

impl FieldLookup for MappingConfig {
    fn header_for(&self, field: TaxField) -> Option<&str> {
        MappingConfig::header_for(self, field)
    }
}

/// Column key for `field`: the mapped header, else the canonical name.
pub fn source_key(lookup: &dyn FieldLookup, field: TaxField) -> &str {
    lookup
        .header_for(field)
        .unwrap_or_else(|| field.canonical_name())
}

/// Project every row onto a [`TaxLine`].
///
/// Blank or missing cells become `0`; everything else passes through
/// unchanged. Fields outside `fields` keep their default (empty) value.
/// Unmapped fields fall back to their canonical name as the column key,
/// which may yield zeros rather than an error.
pub fn project_rows(
    rows: &[RawRow],
    lookup: &dyn FieldLookup,
    fields: &[TaxField],
) -> Vec<ProjectedRow> {
    let keys: Vec<(TaxField, &str)> = fields
        .iter()
        .map(|&field| (field, source_key(lookup, field)))
        .collect();

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut line = TaxLine::default();
            for &(field, key) in &keys {
                let value = match row.get(key) {
                    Some(cell) if !cell.is_blank() => cell.clone(),
                    _ => CellValue::ZERO,
                };
                line.set(field, value);
            }
            ProjectedRow {
                row_index: idx + FIRST_DATA_ROW,
                line,
            }
        })
        .collect()
}
