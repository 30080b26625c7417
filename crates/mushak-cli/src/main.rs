//! Mushak-9.1 HS-code importer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mushak_cli::cli::{Cli, Command};
use mushak_cli::commands::{run_check, run_fields, run_import};
use mushak_cli::logging::{LogConfig, init_logging};
use mushak_cli::summary::{print_check, print_check_json, print_import};

/// Exit code when the sheet still has unmatched required fields.
const EXIT_NOT_READY: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Fields => match run_fields() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Check(args) => match run_check(&args) {
            Ok(report) => {
                let printed = if args.json {
                    print_check_json(&report)
                } else {
                    print_check(&report);
                    Ok(())
                };
                match printed {
                    Ok(()) if report.ready => 0,
                    Ok(()) => EXIT_NOT_READY,
                    Err(error) => {
                        eprintln!("error: {error:#}");
                        1
                    }
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Import(args) => match run_import(&args) {
            Ok(result) => {
                print_import(&result);
                if result.check.ready { 0 } else { EXIT_NOT_READY }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Explicit `--log-level` beats `-v/-q`; either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit,
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
