//! Header reconciliation state for the interactive import workflow.
//!
//! [`HeaderReconciliation`] owns the loaded headers and rows together with the
//! [`HeaderMapping`]. Every derived view (header checks, the ready predicate,
//! projected rows) is recomputed from that state on each call, so it can never
//! go stale after a transition.
//!
//! Transitions:
//! - [`load`](HeaderReconciliation::load) replaces the sheet and auto-maps exact matches
//! - [`accept_suggestion`](HeaderReconciliation::accept_suggestion) maps the fuzzy suggestion
//! - [`select_manual`](HeaderReconciliation::select_manual) maps any header unconditionally
//! - [`reset`](HeaderReconciliation::reset) clears everything

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use mushak_model::{FieldMapping, MappingConfig, ParsedSheet, ProjectedRow, RawRow, TaxField};

use crate::error::MappingError;
use crate::project::{FieldLookup, project_rows};
use crate::suggest::{SuggestionPolicy, suggest_with_distance};
use crate::utils::normalize_header;

/// How a mapping entry came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingSource {
    /// Populated on load from an exact normalized match.
    Exact,
    /// The user accepted the fuzzy suggestion.
    Suggested,
    /// The user picked the header explicitly.
    Manual,
}

impl MappingSource {
    /// True for entries established by the user rather than by load.
    #[must_use]
    pub const fn is_user(self) -> bool {
        matches!(self, Self::Suggested | Self::Manual)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub header: String,
    pub source: MappingSource,
}

/// Partial map from required field to the raw header backing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    entries: BTreeMap<TaxField, MappingEntry>,
}

impl HeaderMapping {
    pub fn get(&self, field: TaxField) -> Option<&MappingEntry> {
        self.entries.get(&field)
    }

    pub fn contains(&self, field: TaxField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaxField, &MappingEntry)> {
        self.entries.iter().map(|(field, entry)| (*field, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, field: TaxField, header: impl Into<String>, source: MappingSource) {
        self.entries.insert(
            field,
            MappingEntry {
                header: header.into(),
                source,
            },
        );
    }

    fn remove(&mut self, field: TaxField) -> Option<MappingEntry> {
        self.entries.remove(&field)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FieldLookup for HeaderMapping {
    fn header_for(&self, field: TaxField) -> Option<&str> {
        self.get(field).map(|entry| entry.header.as_str())
    }
}

/// Whether a field is importable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "MISSING")]
    Missing,
}

impl FieldStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Missing => "MISSING",
        }
    }
}

/// Which rule satisfied a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// A header normalizes to the field's canonical name.
    Exact,
    /// A user-established mapping; takes precedence over an exact match.
    Manual,
    Unmatched,
}

/// Computed per-field view; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheckResult {
    pub expected: TaxField,
    /// Raw header backing the field, if matched.
    pub found: Option<String>,
    pub status: FieldStatus,
    pub match_kind: MatchKind,
    pub suggestion: Option<String>,
    pub suggestion_distance: Option<usize>,
    pub message: String,
}

impl HeaderCheckResult {
    pub fn found_or_dash(&self) -> &str {
        self.found.as_deref().unwrap_or("-")
    }

    pub fn is_ok(&self) -> bool {
        self.status == FieldStatus::Ok
    }
}

/// Counts over the current checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub total: usize,
    pub exact: usize,
    pub manual: usize,
    pub missing: usize,
}

/// Owner of the loaded sheet and its header mapping.
#[derive(Debug, Clone)]
pub struct HeaderReconciliation {
    fields: Vec<TaxField>,
    headers: Vec<String>,
    rows: Vec<RawRow>,
    mapping: HeaderMapping,
    policy: SuggestionPolicy,
    import_requested: bool,
}

impl Default for HeaderReconciliation {
    fn default() -> Self {
        Self::new(TaxField::ALL.to_vec(), SuggestionPolicy::default())
    }
}

impl HeaderReconciliation {
    pub fn new(fields: Vec<TaxField>, policy: SuggestionPolicy) -> Self {
        Self {
            fields,
            headers: Vec::new(),
            rows: Vec::new(),
            mapping: HeaderMapping::default(),
            policy,
            import_requested: false,
        }
    }

    pub fn with_policy(mut self, policy: SuggestionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fields(&self) -> &[TaxField] {
        &self.fields
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn mapping(&self) -> &HeaderMapping {
        &self.mapping
    }

    pub fn policy(&self) -> SuggestionPolicy {
        self.policy
    }

    /// First loaded header that normalizes to the field's canonical name.
    pub fn exact_match(&self, field: TaxField) -> Option<&str> {
        let expected = normalize_header(field.canonical_name());
        self.headers
            .iter()
            .find(|header| normalize_header(header) == expected)
            .map(String::as_str)
    }

    /// Replace the sheet and record exact matches for fields without a user entry.
    ///
    /// Only newly exact-matched fields are written; every other entry is kept
    /// as it was, even when its header is absent from the new sheet. Closes the
    /// import gate.
    pub fn load(&mut self, sheet: ParsedSheet) {
        self.headers = sheet.headers;
        self.rows = sheet.rows;
        self.import_requested = false;

        let mut auto_mapped = 0usize;
        for field in self.fields.clone() {
            if self
                .mapping
                .get(field)
                .is_some_and(|entry| entry.source.is_user())
            {
                continue;
            }
            if let Some(header) = self.exact_match(field).map(str::to_string) {
                debug!(field = %field, header = %header, "exact header match");
                self.mapping.insert(field, header, MappingSource::Exact);
                auto_mapped += 1;
            }
        }
        info!(
            headers = self.headers.len(),
            rows = self.rows.len(),
            auto_mapped,
            "sheet loaded"
        );
    }

    /// Map `field` to its current suggestion. No-op when there is none.
    pub fn accept_suggestion(&mut self, field: TaxField) -> bool {
        let Some(header) = self.suggestion_for(field).map(str::to_string) else {
            debug!(field = %field, "no suggestion to accept");
            return false;
        };
        debug!(field = %field, header = %header, "suggestion accepted");
        self.mapping.insert(field, header, MappingSource::Suggested);
        true
    }

    /// Accept suggestions for every missing field; returns the fields mapped.
    pub fn accept_all_suggestions(&mut self) -> Vec<TaxField> {
        let missing = self.missing_fields();
        missing
            .into_iter()
            .filter(|&field| self.accept_suggestion(field))
            .collect()
    }

    /// Map `field` to `header` unconditionally; the user always wins.
    pub fn select_manual(&mut self, field: TaxField, header: impl Into<String>) {
        let header = header.into();
        debug!(field = %field, header = %header, "manual mapping selected");
        self.mapping.insert(field, header, MappingSource::Manual);
    }

    /// Like [`select_manual`](Self::select_manual) but rejects headers absent from the sheet.
    pub fn select_existing(
        &mut self,
        field: TaxField,
        header: &str,
    ) -> Result<(), MappingError> {
        let header = header.trim();
        if !self.headers.iter().any(|h| h == header) {
            return Err(MappingError::HeaderNotFound(header.to_string()));
        }
        self.select_manual(field, header);
        Ok(())
    }

    /// Drop a user-established entry; an exact match, if any, takes over again.
    pub fn clear_mapping(&mut self, field: TaxField) -> bool {
        match self.mapping.get(field) {
            Some(entry) if entry.source.is_user() => {
                self.mapping.remove(field);
                if let Some(header) = self.exact_match(field).map(str::to_string) {
                    self.mapping.insert(field, header, MappingSource::Exact);
                }
                true
            }
            _ => false,
        }
    }

    /// Replay persisted selections onto the loaded headers as manual entries.
    ///
    /// Fields already resolving to the saved header are left untouched. Entries
    /// naming a header absent from the sheet are skipped and returned.
    pub fn apply_config(&mut self, config: &MappingConfig) -> Vec<FieldMapping> {
        let mut stale = Vec::new();
        for mapping in &config.mappings {
            if !self.fields.contains(&mapping.field)
                || self.resolved_header(mapping.field) == Some(mapping.header.as_str())
            {
                continue;
            }
            if self.select_existing(mapping.field, &mapping.header).is_err() {
                stale.push(mapping.clone());
            }
        }
        stale
    }

    /// Clear headers, rows and every mapping entry.
    pub fn reset(&mut self) {
        self.headers.clear();
        self.rows.clear();
        self.mapping.clear();
        self.import_requested = false;
        debug!("reconciliation reset");
    }

    /// Header the projector reads for `field`, if matched.
    pub fn resolved_header(&self, field: TaxField) -> Option<&str> {
        self.mapping
            .header_for(field)
            .or_else(|| self.exact_match(field))
    }

    fn suggestion_for(&self, field: TaxField) -> Option<&str> {
        suggest_with_distance(field.canonical_name(), &self.headers, self.policy)
            .map(|best| best.candidate)
    }

    fn check(&self, field: TaxField) -> HeaderCheckResult {
        let entry = self.mapping.get(field);
        let exact = self.exact_match(field);
        let match_kind = match (entry, exact) {
            (Some(entry), _) if entry.source.is_user() => MatchKind::Manual,
            (Some(_), _) | (None, Some(_)) => MatchKind::Exact,
            (None, None) => MatchKind::Unmatched,
        };
        let status = if match_kind == MatchKind::Unmatched {
            FieldStatus::Missing
        } else {
            FieldStatus::Ok
        };
        let suggestion =
            suggest_with_distance(field.canonical_name(), &self.headers, self.policy);
        let message = match (match_kind, suggestion) {
            (MatchKind::Exact, _) => "Matched".to_string(),
            (MatchKind::Manual, _) => "Matched (manual)".to_string(),
            (MatchKind::Unmatched, Some(best)) => {
                format!("Column missing; did you mean '{}'?", best.candidate)
            }
            (MatchKind::Unmatched, None) => "Column missing".to_string(),
        };
        HeaderCheckResult {
            expected: field,
            found: self.resolved_header(field).map(str::to_string),
            status,
            match_kind,
            suggestion: suggestion.map(|best| best.candidate.to_string()),
            suggestion_distance: suggestion.map(|best| best.distance),
            message,
        }
    }

    /// One result per required field, in field order.
    pub fn checks(&self) -> Vec<HeaderCheckResult> {
        self.fields.iter().map(|&field| self.check(field)).collect()
    }

    /// True iff every required field is matched.
    pub fn is_ready(&self) -> bool {
        self.fields
            .iter()
            .all(|&field| self.mapping.contains(field) || self.exact_match(field).is_some())
    }

    pub fn missing_fields(&self) -> Vec<TaxField> {
        self.fields
            .iter()
            .copied()
            .filter(|&field| !self.mapping.contains(field) && self.exact_match(field).is_none())
            .collect()
    }

    pub fn summary(&self) -> ReconciliationSummary {
        let checks = self.checks();
        let count = |kind: MatchKind| checks.iter().filter(|c| c.match_kind == kind).count();
        ReconciliationSummary {
            total: checks.len(),
            exact: count(MatchKind::Exact),
            manual: count(MatchKind::Manual),
            missing: count(MatchKind::Unmatched),
        }
    }

    /// Open the import gate and project, or report what is still missing.
    pub fn import(&mut self) -> Result<Vec<ProjectedRow>, MappingError> {
        if !self.is_ready() {
            return Err(MappingError::NotReady {
                missing: self.missing_fields(),
            });
        }
        self.import_requested = true;
        let rows = self.projected_rows();
        info!(rows = rows.len(), "ready to import");
        Ok(rows)
    }

    /// Current projection; empty until [`import`](Self::import) succeeds or
    /// while the mapping is incomplete.
    pub fn projected_rows(&self) -> Vec<ProjectedRow> {
        if !self.import_requested || !self.is_ready() {
            return Vec::new();
        }
        project_rows(&self.rows, &ResolvedLookup(self), &self.fields)
    }

    /// Resolved mapping as a persistable config, in field order.
    pub fn to_config(&self) -> MappingConfig {
        let mappings = self
            .fields
            .iter()
            .filter_map(|&field| {
                self.resolved_header(field).map(|header| FieldMapping {
                    field,
                    header: header.to_string(),
                })
            })
            .collect();
        MappingConfig {
            max_distance: Some(self.policy.max_distance),
            mappings,
        }
    }
}

/// Mapping entry first, then the exact match.
struct ResolvedLookup<'a>(&'a HeaderReconciliation);

impl FieldLookup for ResolvedLookup<'_> {
    fn header_for(&self, field: TaxField) -> Option<&str> {
        self.0.resolved_header(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(headers: &[&str]) -> ParsedSheet {
        ParsedSheet::new(headers.iter().map(|h| h.to_string()).collect(), Vec::new())
    }

    #[test]
    fn load_auto_maps_exact_headers_to_raw_text() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["hs code", "Description", "cd"]));
        let entry = state.mapping().get(TaxField::HsCode).expect("hs code mapped");
        assert_eq!(entry.header, "hs code");
        assert_eq!(entry.source, MappingSource::Exact);
        assert_eq!(state.mapping().len(), 3);
    }

    #[test]
    fn reload_keeps_entries_for_fields_not_newly_matched() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["HSCode", "VATT"]));
        assert!(state.accept_suggestion(TaxField::Vat));

        state.load(sheet(&["Description"]));
        let hs_code = state.mapping().get(TaxField::HsCode).expect("exact entry kept");
        assert_eq!(hs_code.header, "HSCode");
        assert_eq!(hs_code.source, MappingSource::Exact);
        let vat = state.mapping().get(TaxField::Vat).expect("user entry kept");
        assert_eq!(vat.header, "VATT");
        assert_eq!(vat.source, MappingSource::Suggested);
        assert!(state.mapping().contains(TaxField::Description));
    }

    #[test]
    fn reload_without_a_header_keeps_the_field_ready() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["HSCode", "Description", "CD", "SD", "VAT", "AIT", "RD", "TTI"]));
        assert!(state.is_ready());

        state.load(sheet(&["HSCode", "Description", "CD", "SD", "AIT", "RD", "TTI"]));
        assert!(state.mapping().contains(TaxField::Vat));
        assert_eq!(state.resolved_header(TaxField::Vat), Some("VAT"));
        let vat = state
            .checks()
            .into_iter()
            .find(|check| check.expected == TaxField::Vat)
            .expect("vat check");
        assert_eq!(vat.status, FieldStatus::Ok);
        assert!(state.is_ready());
    }

    #[test]
    fn apply_config_skips_headers_missing_from_the_sheet() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["HSCode", "VATT"]));
        let config = MappingConfig {
            max_distance: None,
            mappings: vec![
                FieldMapping {
                    field: TaxField::HsCode,
                    header: "HSCode".to_string(),
                },
                FieldMapping {
                    field: TaxField::Vat,
                    header: "VATT".to_string(),
                },
                FieldMapping {
                    field: TaxField::Tti,
                    header: "TTI total".to_string(),
                },
            ],
        };

        let stale = state.apply_config(&config);
        assert_eq!(stale, vec![config.mappings[2].clone()]);
        assert_eq!(
            state.mapping().get(TaxField::HsCode).map(|e| e.source),
            Some(MappingSource::Exact)
        );
        assert_eq!(
            state.mapping().get(TaxField::Vat).map(|e| e.source),
            Some(MappingSource::Manual)
        );
        assert!(!state.mapping().contains(TaxField::Tti));
    }

    #[test]
    fn clear_mapping_restores_exact_match() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["VAT", "VAT Amount"]));
        state.select_manual(TaxField::Vat, "VAT Amount");
        assert_eq!(state.resolved_header(TaxField::Vat), Some("VAT Amount"));

        assert!(state.clear_mapping(TaxField::Vat));
        assert_eq!(state.resolved_header(TaxField::Vat), Some("VAT"));
        assert!(!state.clear_mapping(TaxField::Vat));
    }

    #[test]
    fn select_existing_rejects_unknown_headers() {
        let mut state = HeaderReconciliation::default();
        state.load(sheet(&["Tax"]));
        assert_eq!(
            state.select_existing(TaxField::Vat, "VAT"),
            Err(MappingError::HeaderNotFound("VAT".to_string()))
        );
        assert!(state.select_existing(TaxField::Vat, " Tax ").is_ok());
        assert_eq!(state.resolved_header(TaxField::Vat), Some("Tax"));
    }
}
