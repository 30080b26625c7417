//! Error types for mapping operations.

use std::fmt;

use mushak_model::TaxField;

/// Errors from mapping operations.
///
/// An unmatched field is not an error; only acting on an incomplete mapping is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Projection was requested before every required field was matched.
    NotReady { missing: Vec<TaxField> },
    /// Header not present in the loaded sheet.
    HeaderNotFound(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady { missing } => {
                let names: Vec<&str> = missing.iter().map(|f| f.canonical_name()).collect();
                write!(f, "Required columns not matched: {}", names.join(", "))
            }
            Self::HeaderNotFound(h) => write!(f, "Column not found in sheet: {h}"),
        }
    }
}

impl std::error::Error for MappingError {}
