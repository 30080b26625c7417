use std::path::PathBuf;

use serde::Serialize;

use mushak_map::{HeaderCheckResult, ReconciliationSummary};
use mushak_output::SubmitReport;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: PathBuf,
    pub rows: usize,
    pub ready: bool,
    pub summary: ReconciliationSummary,
    pub checks: Vec<HeaderCheckResult>,
}

impl CheckReport {
    pub fn missing(&self) -> impl Iterator<Item = &HeaderCheckResult> {
        self.checks.iter().filter(|check| !check.is_ok())
    }
}

#[derive(Debug)]
pub struct ImportResult {
    pub check: CheckReport,
    /// Rows projected; zero when the sheet was not ready.
    pub imported: usize,
    pub outputs: Vec<PathBuf>,
    pub submission: Option<SubmitReport>,
    pub saved_mapping: Option<PathBuf>,
    pub saved_profile: Option<PathBuf>,
    pub dry_run: bool,
}

impl ImportResult {
    pub fn new(check: CheckReport, dry_run: bool) -> Self {
        Self {
            check,
            imported: 0,
            outputs: Vec::new(),
            submission: None,
            saved_mapping: None,
            saved_profile: None,
            dry_run,
        }
    }
}
