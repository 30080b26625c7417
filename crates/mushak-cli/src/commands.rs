use std::path::Path;

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{Level, debug, info, info_span, trace, warn};

use mushak_ingest::read_sheet;
use mushak_map::{
    DEFAULT_MAX_DISTANCE, HeaderReconciliation, MappingError, MappingRepository,
    SuggestionPolicy, load_mapping_file, save_mapping_file,
};
use mushak_model::{MappingConfig, ProjectedRow, TaxField};
use mushak_output::{ExportFormat, HttpSubmitter, SubmitError};

use crate::cli::{CheckArgs, ImportArgs, MappingArgs};
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::{CheckReport, ImportResult};

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Label"]);
    apply_table_style(&mut table);
    for field in TaxField::ALL {
        table.add_row(vec![field.canonical_name(), field.label()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let span = info_span!("check", file = %args.file.display());
    let _guard = span.enter();
    let state = reconcile(&args.file, &args.mapping)?;
    Ok(check_report(&args.file, &state))
}

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let mut state = reconcile(&args.file, &args.mapping)?;
    let mut result = ImportResult::new(check_report(&args.file, &state), args.dry_run);

    let rows = match state.import() {
        Ok(rows) => rows,
        Err(MappingError::NotReady { missing }) => {
            warn!(missing = ?missing, "sheet is not ready to import");
            return Ok(result);
        }
        Err(error) => return Err(error.into()),
    };
    result.imported = rows.len();
    trace_rows(&rows);

    if args.dry_run {
        info!(rows = rows.len(), "dry run, nothing written");
        return Ok(result);
    }

    let exports = [
        (args.xlsx.as_ref(), ExportFormat::Xlsx),
        (args.csv.as_ref(), ExportFormat::Csv),
        (args.json.as_ref(), ExportFormat::Json),
    ];
    for (path, format) in exports {
        let Some(path) = path else {
            continue;
        };
        info_span!("export", format = ?format, path = %path.display())
            .in_scope(|| format.writer().write_rows(&rows, path))?;
        result.outputs.push(path.clone());
    }

    if let Some(url) = &args.submit {
        let submitter = HttpSubmitter::new(url).map_err(|error| submit_error(&error))?;
        let report = info_span!("submit", endpoint = %submitter.endpoint())
            .in_scope(|| submitter.submit(&rows))
            .map_err(|error| submit_error(&error))?;
        result.submission = Some(report);
    }

    let config = state.to_config();
    if let Some(path) = &args.save_mapping {
        save_mapping_file(path, &config)?;
        result.saved_mapping = Some(path.clone());
    }
    if let Some(profile) = &args.mapping.profile {
        let repository = MappingRepository::new(args.mapping.repo.clone())?;
        let path = repository.save(profile, &config)?;
        info!(profile = %profile, path = %path.display(), "mapping profile saved");
        result.saved_profile = Some(path);
    }

    Ok(result)
}

/// Read the sheet and resolve its headers from saved mappings, flags and suggestions.
fn reconcile(file: &Path, args: &MappingArgs) -> Result<HeaderReconciliation> {
    let sheet = info_span!("ingest")
        .in_scope(|| read_sheet(file))
        .with_context(|| format!("read {}", file.display()))?;

    let saved = saved_mappings(args)?;
    let max_distance = args
        .max_distance
        .or_else(|| saved.iter().rev().find_map(|(_, config)| config.max_distance))
        .unwrap_or(DEFAULT_MAX_DISTANCE);

    let span = info_span!("reconcile", max_distance);
    let _guard = span.enter();
    let mut state =
        HeaderReconciliation::default().with_policy(SuggestionPolicy::new(max_distance));
    state.load(sheet);

    for (source, config) in &saved {
        replay_config(&mut state, source, config);
    }
    for mapping in &args.map {
        state
            .select_existing(mapping.field, &mapping.header)
            .with_context(|| format!("--map {}={}", mapping.field, mapping.header))?;
    }
    if args.accept_suggestions {
        let accepted = state.accept_all_suggestions();
        if !accepted.is_empty() {
            info!(count = accepted.len(), "accepted header suggestions");
        }
    }

    let summary = state.summary();
    info!(
        exact = summary.exact,
        manual = summary.manual,
        missing = summary.missing,
        "reconcile complete"
    );
    Ok(state)
}

/// Profile first, then the mapping file, so the file wins on conflicts.
fn saved_mappings(args: &MappingArgs) -> Result<Vec<(String, MappingConfig)>> {
    let mut saved = Vec::new();
    if let Some(profile) = &args.profile {
        let repository = MappingRepository::new(args.repo.clone())?;
        match repository.load(profile)? {
            Some(config) => {
                info!(profile = %profile, mappings = config.mappings.len(), "loaded mapping profile");
                saved.push((format!("profile {profile}"), config));
            }
            None => debug!(profile = %profile, "no saved profile"),
        }
    }
    if let Some(path) = &args.mapping_file {
        let config = load_mapping_file(path)?;
        saved.push((path.display().to_string(), config));
    }
    Ok(saved)
}

/// Apply saved selections that still fit the sheet; stale ones are skipped.
fn replay_config(state: &mut HeaderReconciliation, source: &str, config: &MappingConfig) {
    for stale in state.apply_config(config) {
        warn!(
            source,
            field = %stale.field,
            header = %stale.header,
            "saved mapping no longer applies"
        );
    }
}

fn check_report(file: &Path, state: &HeaderReconciliation) -> CheckReport {
    CheckReport {
        file: file.to_path_buf(),
        rows: state.rows().len(),
        ready: state.is_ready(),
        summary: state.summary(),
        checks: state.checks(),
    }
}

fn trace_rows(rows: &[ProjectedRow]) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    for row in rows {
        let hs_code = row.get(TaxField::HsCode).to_string();
        let tti = row.get(TaxField::Tti).to_string();
        trace!(
            row = row.row_index,
            hs_code = %redact_value(&hs_code),
            tti = %redact_value(&tti),
            "projected row"
        );
    }
}

fn submit_error(error: &SubmitError) -> anyhow::Error {
    anyhow!("{} ({error})", error.user_message())
}
