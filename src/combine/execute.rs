//! Combine execution - effectful operations
//!
//! Takes a `CombinePlan` and applies it on the host: create the
//! integration branch, merge each step in order, open the PR.

use crate::combine::ProgressCallback;
use crate::combine::plan::CombinePlan;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeResult, PullRequest};
use tracing::{info, warn};

/// A merge that was applied to the integration branch
#[derive(Debug, Clone)]
pub struct AppliedMerge {
    /// PR number
    pub pr_number: u64,
    /// Head branch that was merged
    pub head_ref: String,
    /// Host response
    pub result: MergeResult,
}

/// Result of a completed combine run
#[derive(Debug, Clone)]
pub struct CombineResult {
    /// Commit the integration branch was created at
    pub base_sha: String,
    /// Merges applied, in order
    pub merges: Vec<AppliedMerge>,
    /// The combined PR
    pub pull_request: PullRequest,
}

/// Execute the combine plan (EFFECTFUL)
///
/// Every step must succeed. The first failing call aborts the run. Once the
/// integration branch exists, the failure is wrapped in
/// [`Error::PartialCombine`] so the caller learns what was left on the host.
pub async fn execute_combine(
    plan: &CombinePlan,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<CombineResult> {
    let base_sha = platform.get_branch_sha(&plan.base).await?;
    platform.create_branch(&plan.branch, &base_sha).await?;
    info!(branch = %plan.branch, sha = %base_sha, "created integration branch");
    progress
        .on_message(&format!("Created branch {} from {}", plan.branch, plan.base))
        .await;

    let mut merges = Vec::with_capacity(plan.steps.len());
    for step in &plan.steps {
        progress
            .on_message(&format!("Merging PR #{}: {}", step.pr_number, step.pr_title))
            .await;

        let result = match platform
            .merge_branch(&plan.branch, &step.head_ref, &step.commit_message)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    branch = %plan.branch,
                    applied = merges.len(),
                    planned = plan.steps.len(),
                    head = %step.head_ref,
                    "merge failed, integration branch left partially combined"
                );
                return Err(left_behind(plan, merges.len(), e));
            }
        };

        if !result.merged {
            info!(head = %step.head_ref, "nothing to merge, already contained");
        }
        merges.push(AppliedMerge {
            pr_number: step.pr_number,
            head_ref: step.head_ref.clone(),
            result,
        });
    }

    let pull_request = match platform
        .create_pr(&plan.branch, &plan.base, &plan.title, &plan.body)
        .await
    {
        Ok(pr) => pr,
        Err(e) => {
            warn!(
                branch = %plan.branch,
                applied = merges.len(),
                "creating the combined PR failed, integration branch left in place"
            );
            return Err(left_behind(plan, merges.len(), e));
        }
    };

    info!(pr_number = pull_request.number, merges = merges.len(), "opened combined PR");
    progress
        .on_message(&format!(
            "Opened PR #{}: {}",
            pull_request.number, pull_request.html_url
        ))
        .await;

    Ok(CombineResult {
        base_sha,
        merges,
        pull_request,
    })
}

fn left_behind(plan: &CombinePlan, applied: usize, source: Error) -> Error {
    Error::PartialCombine {
        branch: plan.branch.clone(),
        applied,
        source: Box::new(source),
    }
}
