//! CLI argument definitions for the Mushak importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use mushak_model::FieldMapping;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "mushak-import",
    version,
    about = "Mushak-9.1 HS-code importer - reconcile spreadsheet headers and import tax lines",
    long_about = "Reconcile the headers of an HS-code tax-line spreadsheet against the\n\
                  required Mushak-9.1 fields, then export or submit the projected rows.\n\n\
                  Reads CSV, XLSX, XLS and ODS. Writes XLSX, CSV and JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the required tax-line fields.
    Fields,

    /// Print the header check for a spreadsheet without importing.
    Check(CheckArgs),

    /// Reconcile a spreadsheet and export or submit its rows.
    Import(ImportArgs),
}

/// Options shared by `check` and `import` that shape the reconciliation.
#[derive(Args, Clone, Default)]
pub struct MappingArgs {
    /// Map a field to a header, e.g. `--map VAT="VAT Amount"`. Repeatable.
    #[arg(long = "map", value_name = "FIELD=HEADER")]
    pub map: Vec<FieldMapping>,

    /// JSON mapping file with saved field-to-header selections.
    #[arg(long = "mapping-file", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Accept the closest header for every unmatched field.
    #[arg(long = "accept-suggestions")]
    pub accept_suggestions: bool,

    /// Maximum edit distance for header suggestions.
    #[arg(long = "max-distance", value_name = "N")]
    pub max_distance: Option<usize>,

    /// Named mapping profile stored in the repository.
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Directory holding mapping profiles.
    #[arg(long = "repo", value_name = "DIR", default_value = ".mushak/mappings")]
    pub repo: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Spreadsheet to check (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print the check report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Spreadsheet to import (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Write the projected rows as an XLSX workbook.
    #[arg(long = "xlsx", value_name = "PATH")]
    pub xlsx: Option<PathBuf>,

    /// Write the projected rows as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the projected rows as JSON, including sheet row numbers.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// POST the rows to an import endpoint (a bare host gets the default path).
    #[arg(long = "submit", value_name = "URL")]
    pub submit: Option<String>,

    /// Save the resolved mapping to a JSON file after a successful import.
    #[arg(long = "save-mapping", value_name = "PATH")]
    pub save_mapping: Option<PathBuf>,

    /// Reconcile and project without writing, submitting or saving anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
