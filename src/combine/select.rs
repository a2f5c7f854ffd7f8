//! PR selection
//!
//! Runs as an explicit pipeline:
//! 1. Pure prefilter on branch name and labels
//! 2. Concurrent status lookups for the survivors (only when a status filter is set)
//! 3. Pure status predicate over the resolved statuses

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{CommitStatusState, FilterOptions, PullRequestSummary};
use futures::future::try_join_all;
use std::fmt;
use tracing::{debug, info};

/// Branch prefix used by the Snyk upgrade bot
pub const UPGRADE_BRANCH_PREFIX: &str = "snyk-upgrade-";

/// Why a PR was left out of the combined PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Head branch does not follow the upgrade naming convention
    NotUpgradeBranch,
    /// PR carries the excluded label
    ExcludedLabel(String),
    /// PR lacks the required label
    MissingRequiredLabel(String),
    /// Combined CI status does not satisfy the configured filter
    ChecksNotPassing(CommitStatusState),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUpgradeBranch => write!(f, "not an upgrade branch"),
            Self::ExcludedLabel(label) => write!(f, "labelled '{label}'"),
            Self::MissingRequiredLabel(label) => write!(f, "missing label '{label}'"),
            Self::ChecksNotPassing(state) => write!(f, "checks {state}"),
        }
    }
}

/// Outcome of the selection phase
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// PRs to merge, in listing order
    pub accepted: Vec<PullRequestSummary>,
    /// PRs left out, with the reason
    pub rejected: Vec<(PullRequestSummary, Rejection)>,
}

/// Whether a head branch follows the upgrade naming convention
pub fn is_upgrade_branch(head_ref: &str) -> bool {
    head_ref.starts_with(UPGRADE_BRANCH_PREFIX)
}

/// Cheap checks that need no API call: branch prefix, then labels
pub fn prefilter(pr: &PullRequestSummary, options: &FilterOptions) -> Option<Rejection> {
    if !is_upgrade_branch(&pr.head_ref) {
        return Some(Rejection::NotUpgradeBranch);
    }

    if let Some(label) = &options.excluded_label
        && pr.has_label(label)
    {
        return Some(Rejection::ExcludedLabel(label.clone()));
    }

    if let Some(label) = &options.required_label
        && !pr.has_label(label)
    {
        return Some(Rejection::MissingRequiredLabel(label.clone()));
    }

    None
}

/// Status predicate, applied to an already fetched combined status
pub fn check_status(state: &CommitStatusState, options: &FilterOptions) -> Option<Rejection> {
    let passing = match state {
        CommitStatusState::Success => true,
        CommitStatusState::Skipped => !options.require_all_checks_pass,
        _ => !options.needs_status(),
    };

    (!passing).then(|| Rejection::ChecksNotPassing(state.clone()))
}

/// Select the upgrade PRs that pass every configured filter
///
/// Status lookups run concurrently; the first failing lookup fails the
/// whole selection.
pub async fn select_pull_requests(
    platform: &dyn PlatformService,
    pull_requests: Vec<PullRequestSummary>,
    options: &FilterOptions,
) -> Result<Selection> {
    let mut selection = Selection::default();
    let mut candidates = Vec::new();

    for pr in pull_requests {
        match prefilter(&pr, options) {
            Some(reason) => selection.rejected.push((pr, reason)),
            None => candidates.push(pr),
        }
    }

    if !options.needs_status() {
        selection.accepted = candidates;
        log_selection(&selection);
        return Ok(selection);
    }

    debug!(count = candidates.len(), "fetching combined statuses");
    let lookups = candidates
        .iter()
        .map(|pr| platform.get_combined_status(&pr.head_sha));
    let statuses = try_join_all(lookups).await?;

    for (pr, status) in candidates.into_iter().zip(statuses) {
        match check_status(&status.state, options) {
            Some(reason) => selection.rejected.push((pr, reason)),
            None => selection.accepted.push(pr),
        }
    }

    log_selection(&selection);
    Ok(selection)
}

fn log_selection(selection: &Selection) {
    for (pr, reason) in &selection.rejected {
        debug!(pr_number = pr.number, head = %pr.head_ref, %reason, "skipping PR");
    }
    info!(
        accepted = selection.accepted.len(),
        rejected = selection.rejected.len(),
        "selected upgrade PRs"
    );
}
