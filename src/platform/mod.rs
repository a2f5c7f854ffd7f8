//! Platform service for the repository host
//!
//! Narrow capability set used by the combiner, so the orchestration can
//! run against a fake in tests.

mod github;

pub use github::GitHubService;

use crate::config::CombineConfig;
use crate::error::Result;
use crate::types::{CombinedStatus, MergeResult, PlatformConfig, PullRequest, PullRequestSummary};
use async_trait::async_trait;

/// Platform service trait for the operations the combiner needs
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open pull requests, in the host's listing order
    ///
    /// Only the first page is read.
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>>;

    /// Get the combined CI status for a commit
    async fn get_combined_status(&self, sha: &str) -> Result<CombinedStatus>;

    /// Resolve the commit SHA a branch points at
    async fn get_branch_sha(&self, branch: &str) -> Result<String>;

    /// Create a new branch pointing at `sha`
    ///
    /// Fails with [`Error::BranchExists`](crate::error::Error::BranchExists)
    /// if the branch is already present.
    async fn create_branch(&self, name: &str, sha: &str) -> Result<()>;

    /// Merge `head` into `base` with a merge commit
    async fn merge_branch(&self, base: &str, head: &str, commit_message: &str)
    -> Result<MergeResult>;

    /// Open a new pull request
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Create the platform service for a validated configuration
pub fn create_platform_service(config: &CombineConfig) -> Result<Box<dyn PlatformService>> {
    let service = GitHubService::new(
        &config.token,
        config.repository.owner.clone(),
        config.repository.repo.clone(),
        config.api_url.clone(),
    )?;
    Ok(Box::new(service))
}
