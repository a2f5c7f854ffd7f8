//! Combine planning - pure functions
//!
//! No I/O happens here; the plan describes every hosting-side mutation
//! the execute phase will perform.

use crate::types::{MergeOrder, PullRequestSummary};
use std::fmt;

/// Name of the integration branch
pub const COMBINED_BRANCH: &str = "combined-snyk-security-updates";

/// Branch the integration branch starts from and targets
pub const BASE_BRANCH: &str = "main";

/// Title of the combined PR
pub const COMBINED_PR_TITLE: &str = "chore: combined Snyk security updates";

const BODY_HEADER: &str = "This PR combines the changes from the following Snyk upgrade PRs:\n";

/// Merge one PR's head branch into the integration branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStep {
    /// PR number
    pub pr_number: u64,
    /// PR title (listed in the combined PR body)
    pub pr_title: String,
    /// Head branch to merge
    pub head_ref: String,
    /// Message for the merge commit
    pub commit_message: String,
}

impl fmt::Display for MergeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "merge PR #{} ({}): {}", self.pr_number, self.head_ref, self.pr_title)
    }
}

/// Combine plan - the functional core output
#[derive(Debug, Clone)]
pub struct CombinePlan {
    /// Integration branch to create
    pub branch: String,
    /// Branch to start from and open the PR against
    pub base: String,
    /// Merges to perform, in order
    pub steps: Vec<MergeStep>,
    /// Combined PR title
    pub title: String,
    /// Combined PR body
    pub body: String,
}

impl CombinePlan {
    /// Number of merges planned
    pub const fn merge_count(&self) -> usize {
        self.steps.len()
    }
}

/// Commit message for merging `head_ref`
pub fn merge_commit_message(head_ref: &str) -> String {
    format!("Merge branch '{head_ref}'")
}

/// Render the combined PR body: one `- <title>` line per merged PR
pub fn render_body<'a>(titles: impl IntoIterator<Item = &'a str>) -> String {
    let lines: Vec<String> = titles.into_iter().map(|t| format!("- {t}")).collect();
    format!("{BODY_HEADER}{}", lines.join("\n"))
}

/// Build the plan for a set of accepted PRs
pub fn create_combine_plan(accepted: &[PullRequestSummary], order: MergeOrder) -> CombinePlan {
    let mut prs: Vec<&PullRequestSummary> = accepted.iter().collect();
    if order == MergeOrder::PrNumber {
        prs.sort_by_key(|pr| pr.number);
    }

    let steps: Vec<MergeStep> = prs
        .into_iter()
        .map(|pr| MergeStep {
            pr_number: pr.number,
            pr_title: pr.title.clone(),
            head_ref: pr.head_ref.clone(),
            commit_message: merge_commit_message(&pr.head_ref),
        })
        .collect();

    let body = render_body(steps.iter().map(|s| s.pr_title.as_str()));

    CombinePlan {
        branch: COMBINED_BRANCH.to_string(),
        base: BASE_BRANCH.to_string(),
        steps,
        title: COMBINED_PR_TITLE.to_string(),
        body,
    }
}
