//! Header reconciliation for tax-line spreadsheets.
//!
//! Maps arbitrary spreadsheet headers onto the required [`TaxField`]s using
//! exact normalized matching, fuzzy suggestion and manual override, then
//! projects raw rows onto fixed-shape [`ProjectedRow`]s.
//!
//! [`TaxField`]: mushak_model::TaxField
//! [`ProjectedRow`]: mushak_model::ProjectedRow

#![deny(unsafe_code)]

pub mod distance;
pub mod error;
pub mod project;
pub mod repository;
pub mod state;
pub mod suggest;
pub mod utils;

pub use distance::levenshtein;
pub use error::MappingError;
pub use project::{FIRST_DATA_ROW, FieldLookup, project_rows, source_key};
pub use repository::{
    MappingRepository, ProfileMetadata, StoredMappingConfig, load_mapping_file,
    save_mapping_file,
};
pub use state::{
    FieldStatus, HeaderCheckResult, HeaderMapping, HeaderReconciliation, MappingEntry,
    MappingSource, MatchKind, ReconciliationSummary,
};
pub use suggest::{
    DEFAULT_MAX_DISTANCE, Suggestion, SuggestionPolicy, closest_candidate, suggest,
    suggest_with_distance,
};
pub use utils::{normalize_header, normalize_header_opt, same_header};
