//! `atelier` binary entry point.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use atelier_cli::error::ErrorReport;
use atelier_cli::{run, Cli};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            let report = ErrorReport::from(&e);
            match serde_json::to_string(&report) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", report.message),
            }
            ExitCode::from(report.code.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
/// Default: `info,atelier=debug`
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,atelier=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
