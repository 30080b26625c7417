//! HTTP submission of imported tax lines.
//!
//! The import endpoint takes a JSON array of tax lines in the canonical field
//! names. The sheet row index is a client-side detail and is not sent.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use mushak_model::{ProjectedRow, TaxLine};

/// Path appended when only a server root is given.
pub const DEFAULT_IMPORT_PATH: &str = "/api/hs-code/import";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while submitting rows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// Request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("import rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl SubmitError {
    /// Short message suitable for the terminal.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the import server.",
            Self::Rejected { status, .. } if *status >= 500 => {
                "The import server failed to process the rows."
            }
            Self::Rejected { .. } => "The import server rejected the rows.",
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReport {
    pub endpoint: String,
    pub accepted: usize,
    pub status: u16,
}

/// Strips the row index and keeps the tax-line fields.
pub fn submission_payload(rows: &[ProjectedRow]) -> Vec<&TaxLine> {
    rows.iter().map(|row| &row.line).collect()
}

/// Appends [`DEFAULT_IMPORT_PATH`] to URLs that carry no path.
pub fn resolve_endpoint(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let after_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    if after_scheme.contains('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}{DEFAULT_IMPORT_PATH}")
    }
}

/// Blocking client posting rows to the import endpoint.
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(url: &str) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        Ok(Self::with_client(client, url))
    }

    /// Uses a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: Client, url: &str) -> Self {
        Self {
            client,
            endpoint: resolve_endpoint(url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts all rows in one request. No retry is attempted.
    pub fn submit(&self, rows: &[ProjectedRow]) -> Result<SubmitReport, SubmitError> {
        debug!(endpoint = %self.endpoint, rows = rows.len(), "posting rows");

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                USER_AGENT,
                format!("mushak-import/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&submission_payload(rows))
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "import rejected");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(endpoint = %self.endpoint, rows = rows.len(), "rows submitted");
        Ok(SubmitReport {
            endpoint: self.endpoint.clone(),
            accepted: rows.len(),
            status: status.as_u16(),
        })
    }
}
