//! Output stage for imported tax lines.
//!
//! - **XLSX**: `HS Codes` worksheet, bold frozen header
//! - **CSV**: same columns as the worksheet
//! - **JSON**: pretty array including the sheet row index
//! - **HTTP**: POST of the tax lines to the import endpoint

mod submit;
mod writer;

pub use submit::{
    DEFAULT_IMPORT_PATH, HttpSubmitter, SubmitError, SubmitReport, resolve_endpoint,
    submission_payload,
};
pub use writer::{
    CsvWriter, EXPORT_COLUMNS, ExportFormat, JsonWriter, RowWriter, SHEET_NAME, XlsxWriter,
};
