//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: unreadable input, rejected submissions
//! - `warn`: duplicate headers, mapping entries that no longer apply
//! - `info`: stage progress and counts
//! - `debug`: individual mapping decisions
//! - `trace`: cell values (redacted unless `--log-data` is passed)

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when cell values must not be logged.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level; everything else stays at `warn`.
const OWN_CRATES: [&str; 5] = [
    "mushak_cli",
    "mushak_ingest",
    "mushak_map",
    "mushak_model",
    "mushak_output",
];

/// Returns true if cell values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Logs go to this file instead of stderr when set.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    tracing_subscriber::registry()
        .with(format_layer(config, writer).with_filter(filter))
        .init();
}

fn format_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let span_events = if config.with_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target)
        .with_span_events(span_events);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Filter directives for our crates at `level`, other crates at `warn`.
fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = String::from("warn");
    for krate in OWN_CRATES {
        directives.push_str(&format!(",{krate}={level}"));
    }
    directives
}

fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level));
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(config: &LogConfig) -> String {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::registry().with(format_layer(config, buffer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info_span!("reconcile").in_scope(|| tracing::info!("inside"));
        });
        let bytes = buffer.0.lock().expect("lock").clone();
        String::from_utf8(bytes).expect("utf8")
    }

    #[test]
    fn span_events_follow_with_spans_in_every_format() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            let mut config = LogConfig {
                format,
                with_ansi: false,
                ..LogConfig::default()
            };
            let output = capture(&config);
            assert!(output.contains("inside"), "{format:?}: {output}");
            assert!(output.contains("close"), "{format:?}: {output}");

            config.with_spans = false;
            let output = capture(&config);
            assert!(output.contains("inside"), "{format:?}: {output}");
            assert!(!output.contains("close"), "{format:?}: {output}");
        }
    }

    #[test]
    fn directives_cover_every_workspace_crate() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        for krate in OWN_CRATES {
            assert!(directives.contains(&format!("{krate}=debug")));
        }
        assert!(default_directives(LevelFilter::OFF).contains("mushak_map=off"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("8471"), REDACTED_VALUE);
    }
}
