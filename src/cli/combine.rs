//! Combine command - merge Snyk upgrade PRs into one PR

use crate::cli::style::{CHECK, Stylize};
use crate::cli::{Cli, CliProgress};
use anstream::println;
use snyk_combine::combine::{CombineOptions, combine_upgrade_prs};
use snyk_combine::config::CombineConfig;
use snyk_combine::error::Result;
use snyk_combine::platform::create_platform_service;
use tracing::debug;

/// Run the combine command
pub async fn run_combine(cli: Cli) -> Result<()> {
    let config = CombineConfig::try_from(cli.into_inputs())?;
    debug!(?config, "loaded configuration");

    let platform = create_platform_service(&config)?;
    let options = CombineOptions {
        filter: config.filter.clone(),
        merge_order: config.merge_order,
    };

    println!(
        "{} {}",
        "Combining Snyk upgrade PRs in".emphasis(),
        config.repository.accent()
    );

    let result = combine_upgrade_prs(platform.as_ref(), &options, &CliProgress).await?;

    println!();
    println!(
        "{} {} merged into {}, PR #{} opened",
        format!("{CHECK} Done:").success(),
        result.merges.len().accent(),
        result.pull_request.head_ref.accent(),
        result.pull_request.number
    );
    println!("{}", result.pull_request.html_url.muted());

    Ok(())
}
