//! snyk-combine CLI

mod cli;

use clap::Parser;
use cli::Cli;
use snyk_combine::error::{GENERIC_FAILURE_MESSAGE, Result, failure_message};
use std::process::ExitCode;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Run in a task so a panic is reported like any other failure.
    match outcome_message(tokio::spawn(cli::run_combine(cli)).await) {
        None => ExitCode::SUCCESS,
        Some(message) => {
            cli::report_failure(&message);
            ExitCode::FAILURE
        }
    }
}

/// Failure message for a finished run, `None` on success
///
/// A task that did not return an error (a panic or a cancellation) has no
/// message of its own and gets the generic one.
fn outcome_message(outcome: std::result::Result<Result<()>, JoinError>) -> Option<String> {
    match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(failure_message(&e)),
        Err(_) => Some(GENERIC_FAILURE_MESSAGE.to_string()),
    }
}
