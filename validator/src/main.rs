//! Update validator CLI entrypoint.
//!
//! This binary checks an update archive against a product distribution and
//! prints a pass or fail banner. Any failure exits with status 1.

use clap::Parser;
use log::debug;
use std::io::Write;
use update_validator::cli::Cli;
use update_validator::config::ValidatorConfig;
use update_validator::error::Result;
use update_validator::output::{failure_message, success_message, summary_line};
use update_validator::progress::{NoProgress, ProgressLine, ProgressObserver};
use update_validator::validate::{ValidationReport, validate};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    let level = cli.log_level();
    if env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init()
        .is_err()
    {
        // A logger is already installed; keep it.
    }
    debug!("log level set to {level}");
}

fn run(cli: &Cli, progress_out: &mut dyn Write) -> Result<ValidationReport> {
    let config = ValidatorConfig::load(cli.config.as_deref())?;
    let request = cli.request();

    let mut progress_line;
    let mut silent = NoProgress;
    let observer: &mut dyn ProgressObserver = if cli.shows_progress() {
        progress_line = ProgressLine::new(progress_out);
        &mut progress_line
    } else {
        &mut silent
    };

    let report = validate(&request, &config, observer)?;
    debug!("{}", summary_line(&report));
    Ok(report)
}

fn exit_code_for_run_result(
    result: Result<ValidationReport>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    match result {
        Ok(report) => {
            write_line(stdout, success_message(&report));
            0
        }
        Err(err) => {
            write_line(stderr, failure_message(&err));
            1
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
