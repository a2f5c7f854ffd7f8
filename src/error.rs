//! Error types for snyk-combine

use thiserror::Error;

/// Message reported when a failure carries no text of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred, panic 😨";

/// Result type alias for snyk-combine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while combining upgrade PRs
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed input
    #[error("{0}")]
    Config(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform error (used by test doubles and non-GitHub failures)
    #[error("Platform error: {0}")]
    Platform(String),

    /// Requested ref, repository or branch does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The integration branch is already present on the remote
    #[error("Branch '{0}' already exists")]
    BranchExists(String),

    /// The hosting side refused a merge because of conflicts
    #[error("Merge conflict merging '{head}' into '{base}'")]
    MergeConflict {
        /// Branch being merged into
        base: String,
        /// Branch being merged
        head: String,
    },

    /// Error surfaced by octocrab
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// A call failed after the integration branch was created
    ///
    /// The branch and any merges already applied stay on the remote.
    #[error("{source} (branch '{branch}' left on the remote with {applied} merge(s) applied)")]
    PartialCombine {
        /// Integration branch left behind
        branch: String,
        /// Merges applied before the failure
        applied: usize,
        /// The failing call's error
        source: Box<Error>,
    },
}

impl Error {
    /// The underlying failure, looking through [`Error::PartialCombine`]
    pub fn root(&self) -> &Self {
        match self {
            Self::PartialCombine { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Text to report for a terminal failure.
///
/// Falls back to [`GENERIC_FAILURE_MESSAGE`] when the error renders empty.
pub fn failure_message(err: &Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}
