//! Core types for snyk-combine

use serde::{Deserialize, Serialize};

/// An open pull request as listed by the hosting API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA
    pub head_sha: String,
    /// Label names attached to the PR
    pub labels: Vec<String>,
}

impl PullRequestSummary {
    /// Whether the PR carries a label with exactly this name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }
}

/// A pull request created by this tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Aggregate CI state reported for a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStatusState {
    /// Every reported check passed
    Success,
    /// At least one check failed
    Failure,
    /// Checks are still running (or none reported yet)
    Pending,
    /// Checks were skipped
    Skipped,
    /// A check errored
    Error,
    /// A state this tool does not know about
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for CommitStatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Pending => write!(f, "pending"),
            Self::Skipped => write!(f, "skipped"),
            Self::Error => write!(f, "error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Combined CI status for a single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStatus {
    /// Commit the status refers to
    pub sha: String,
    /// Overall state
    pub state: CommitStatusState,
    /// Number of individual statuses aggregated
    #[serde(default)]
    pub total_count: u32,
}

/// Result of merging one branch into another on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Whether a merge commit was created
    ///
    /// `false` means the head was already contained in the base.
    pub merged: bool,
    /// The SHA of the merge commit (if one was created)
    pub sha: Option<String>,
}

/// Repository coordinates used by a platform service
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom API base URL (None for api.github.com)
    pub api_url: Option<String>,
}

/// Order in which accepted PRs are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// Order returned by the hosting API's listing
    #[default]
    ListOrder,
    /// Ascending PR number
    PrNumber,
}

/// Filters applied to upgrade PRs before merging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Only merge PRs whose combined status is `success`
    pub require_all_checks_pass: bool,
    /// Merge PRs whose combined status is `success` or `skipped`
    pub accept_skipped_checks: bool,
    /// Only merge PRs carrying this label
    pub required_label: Option<String>,
    /// Never merge PRs carrying this label
    pub excluded_label: Option<String>,
}

impl FilterOptions {
    /// Whether the combined CI status has to be fetched at all
    pub const fn needs_status(&self) -> bool {
        self.require_all_checks_pass || self.accept_skipped_checks
    }
}
