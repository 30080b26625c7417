//! Errors raised while reading input spreadsheets.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("unsupported spreadsheet format: {path} (expected .csv, .xlsx, .xlsm, .xlsb, .xls or .ods)")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("workbook has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
