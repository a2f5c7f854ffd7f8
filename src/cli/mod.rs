//! Command-line surface
//!
//! Every option can also come from the environment a GitHub Action runs
//! in (`INPUT_*` and `GITHUB_*` variables).

mod combine;
mod style;

pub use combine::run_combine;

use anstream::println;
use async_trait::async_trait;
use clap::Parser;
use snyk_combine::combine::ProgressCallback;
use snyk_combine::config::ActionInputs;
use style::arrow;

/// Combine open Snyk upgrade PRs into one pull request
#[derive(Parser, Debug)]
#[command(name = "snyk-combine", version, about)]
pub struct Cli {
    /// GitHub token used for every API call
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Accept PRs whose checks succeeded or were skipped ("true" to enable)
    #[arg(long, env = "INPUT_SKIPSCHECKED")]
    skips_checked: Option<String>,

    /// Only accept PRs whose checks all succeeded ("true" to enable)
    #[arg(long, env = "INPUT_ALLSTEPSPASS")]
    all_steps_pass: Option<String>,

    /// Only accept PRs carrying this label
    #[arg(long, env = "INPUT_INCLUDELABEL")]
    include_label: Option<String>,

    /// Never accept PRs carrying this label
    #[arg(long, env = "INPUT_IGNORELABEL")]
    ignore_label: Option<String>,

    /// Merge in ascending PR number order instead of listing order ("true" to enable)
    #[arg(long, env = "INPUT_SORTBYNUMBER")]
    sort_by_number: Option<String>,

    /// GitHub API base URL (GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Hand the raw values to the library for validation
    fn into_inputs(self) -> ActionInputs {
        ActionInputs {
            token: self.token,
            repository: self.repository,
            skips_checked: self.skips_checked,
            all_steps_pass: self.all_steps_pass,
            include_label: self.include_label,
            ignore_label: self.ignore_label,
            sort_by_number: self.sort_by_number,
            api_url: self.api_url,
        }
    }
}

/// Progress reporter printing one line per message
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("  {} {message}", arrow());
    }
}

/// Report a terminal failure as a workflow error annotation
pub fn report_failure(message: &str) {
    // Workflow commands are single-line.
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    println!("::error::{escaped}");
}
