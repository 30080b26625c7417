//! Spreadsheet cell values and header-keyed raw rows.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as read, without type coercion.
///
/// Serialized untagged so JSON consumers see plain values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// The value substituted for blank numeric cells.
    pub const ZERO: CellValue = CellValue::Integer(0);

    /// True for a missing cell or an empty string.
    ///
    /// Whitespace-only text is not blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell, used by writers that emit number cells.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One data row keyed by raw header text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cell by its exact raw header.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    /// Insert a cell unless the header already holds one.
    ///
    /// Duplicate headers therefore resolve to the first column.
    pub fn insert_first(&mut self, header: impl Into<String>, value: CellValue) -> bool {
        match self.cells.entry(header.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (header, value) in iter {
            row.insert_first(header, value.into());
        }
        row
    }
}

/// The parsed first worksheet of an input file.
///
/// Headers come from row 1; data starts at row 2 with blank rows removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedSheet {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }
}
