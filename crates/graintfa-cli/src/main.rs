//! `graintfa` binary: renders a scene document to a PNG.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use graintfa::GraintfaError;
use graintfa_cli::{Args, error_adapter::to_reportable};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match graintfa_cli::run(&args) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Sets up `env_logger` at `level`; `RUST_LOG` directives still apply on
/// top. Unknown level names fall back to `warn`.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level {level:?}, falling back to warn");
        LevelFilter::Warn
    });

    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
    info!(level:? = filter; "Graintfa starting");
}

/// Logs `err` as a miette diagnostic, or as plain text if rendering fails.
fn report(err: &GraintfaError) {
    let mut rendered = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut rendered, &to_reportable(err)) {
        Ok(()) => error!("{rendered}"),
        Err(_) => error!("{err}"),
    }
}
