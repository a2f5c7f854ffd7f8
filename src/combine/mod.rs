//! PR combiner
//!
//! Three-phase pattern:
//! 1. Select - list open PRs and filter them (effectful status lookups, pure predicates)
//! 2. Plan - create `CombinePlan` (pure, testable)
//! 3. Execute - create the branch, merge, open the PR (effectful)

mod execute;
mod plan;
mod select;

pub use execute::{AppliedMerge, CombineResult, execute_combine};
pub use plan::{
    BASE_BRANCH, COMBINED_BRANCH, COMBINED_PR_TITLE, CombinePlan, MergeStep, create_combine_plan,
    merge_commit_message, render_body,
};
pub use select::{
    Rejection, Selection, UPGRADE_BRANCH_PREFIX, check_status, is_upgrade_branch, prefilter,
    select_pull_requests,
};

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{FilterOptions, MergeOrder};
use async_trait::async_trait;
use tracing::info;

/// Receives human-readable progress while a run executes
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Report a progress message
    async fn on_message(&self, message: &str);
}

/// Progress sink that drops every message
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}

/// Options for one combine run
#[derive(Debug, Clone, Default)]
pub struct CombineOptions {
    /// PR filters
    pub filter: FilterOptions,
    /// Merge order policy
    pub merge_order: MergeOrder,
}

/// Combine every open upgrade PR that passes the filters into one PR
///
/// The integration branch is created even when no PR is selected.
pub async fn combine_upgrade_prs(
    platform: &dyn PlatformService,
    options: &CombineOptions,
    progress: &dyn ProgressCallback,
) -> Result<CombineResult> {
    let config = platform.config();
    info!(owner = %config.owner, repo = %config.repo, "combining upgrade PRs");

    let open = platform.list_open_pull_requests().await?;
    progress
        .on_message(&format!("Found {} open PR(s)", open.len()))
        .await;

    let selection = select_pull_requests(platform, open, &options.filter).await?;
    for (pr, reason) in &selection.rejected {
        if *reason != Rejection::NotUpgradeBranch {
            progress
                .on_message(&format!("Skipping PR #{} ({}): {reason}", pr.number, pr.head_ref))
                .await;
        }
    }

    let plan = create_combine_plan(&selection.accepted, options.merge_order);
    progress
        .on_message(&format!("Combining {} upgrade PR(s)", plan.merge_count()))
        .await;

    execute_combine(&plan, platform, progress).await
}
