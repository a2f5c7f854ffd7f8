//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use snyk_combine::error::{Error, Result};
use snyk_combine::platform::PlatformService;
use snyk_combine::types::{
    CombinedStatus, CommitStatusState, MergeResult, PlatformConfig, PullRequest,
    PullRequestSummary,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub name: String,
    pub sha: String,
}

/// Call record for `merge_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub base: String,
    pub head: String,
    pub commit_message: String,
}

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - In-memory branches (creating an existing branch fails)
/// - Call tracking for verification
/// - Configurable statuses per commit
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PullRequestSummary>>,
    statuses: Mutex<HashMap<String, CommitStatusState>>,
    branches: Mutex<HashMap<String, String>>,
    conflicting_heads: Mutex<HashSet<String>>,
    // Call tracking
    list_calls: Mutex<usize>,
    status_calls: Mutex<Vec<String>>,
    get_branch_calls: Mutex<Vec<String>>,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_status: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config and a `main` branch
    pub fn with_config(config: PlatformConfig) -> Self {
        let branches = HashMap::from([("main".to_string(), "main_sha".to_string())]);
        Self {
            config,
            next_pr_number: AtomicU64::new(100),
            open_prs: Mutex::new(Vec::new()),
            statuses: Mutex::new(HashMap::new()),
            branches: Mutex::new(branches),
            conflicting_heads: Mutex::new(HashSet::new()),
            list_calls: Mutex::new(0),
            status_calls: Mutex::new(Vec::new()),
            get_branch_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_status: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    /// Set the open PRs returned by `list_open_pull_requests`
    pub fn set_open_prs(&self, prs: Vec<PullRequestSummary>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Set the combined status for a commit
    pub fn set_status(&self, sha: &str, state: CommitStatusState) {
        self.statuses
            .lock()
            .unwrap()
            .insert(sha.to_string(), state);
    }

    /// Add a branch that already exists on the remote
    pub fn add_branch(&self, name: &str, sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), sha.to_string());
    }

    /// Remove a branch from the remote
    pub fn remove_branch(&self, name: &str) {
        self.branches.lock().unwrap().remove(name);
    }

    // === Error injection methods ===

    /// Make `list_open_pull_requests` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_combined_status` return an error
    pub fn fail_status(&self, msg: &str) {
        *self.error_on_status.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make merging this head branch fail with a conflict
    pub fn conflict_on(&self, head: &str) {
        self.conflicting_heads
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    // === Call verification methods ===

    /// Number of `list_open_pull_requests` calls
    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    /// Get all SHAs `get_combined_status` was called with
    pub fn get_status_calls(&self) -> Vec<String> {
        self.status_calls.lock().unwrap().clone()
    }

    /// Get all branches `get_branch_sha` was called with
    pub fn get_branch_calls(&self) -> Vec<String> {
        self.get_branch_calls.lock().unwrap().clone()
    }

    /// Get all `create_branch` calls
    pub fn get_create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// Get all `merge_branch` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Heads merged, in call order
    pub fn merged_heads(&self) -> Vec<String> {
        self.get_merge_calls().into_iter().map(|c| c.head).collect()
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// The single `create_pr` call of a run
    pub fn created_pr(&self) -> CreatePrCall {
        let calls = self.get_create_pr_calls();
        assert_eq!(calls.len(), 1, "Expected one create_pr call but got: {calls:?}");
        calls[0].clone()
    }

    /// Assert that no status was ever requested
    pub fn assert_status_not_called(&self) {
        let calls = self.get_status_calls();
        assert!(
            calls.is_empty(),
            "Expected get_combined_status NOT to be called but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>> {
        *self.list_calls.lock().unwrap() += 1;

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn get_combined_status(&self, sha: &str) -> Result<CombinedStatus> {
        self.status_calls.lock().unwrap().push(sha.to_string());

        if let Some(msg) = self.error_on_status.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let state = self
            .statuses
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or(CommitStatusState::Pending);
        Ok(CombinedStatus {
            sha: sha.to_string(),
            state,
            total_count: 1,
        })
    }

    async fn get_branch_sha(&self, branch: &str) -> Result<String> {
        self.get_branch_calls
            .lock()
            .unwrap()
            .push(branch.to_string());

        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("branch '{branch}'")))
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<()> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                name: name.to_string(),
                sha: sha.to_string(),
            });

        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(name) {
            return Err(Error::BranchExists(name.to_string()));
        }
        branches.insert(name.to_string(), sha.to_string());
        Ok(())
    }

    async fn merge_branch(
        &self,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            base: base.to_string(),
            head: head.to_string(),
            commit_message: commit_message.to_string(),
        });

        if self.conflicting_heads.lock().unwrap().contains(head) {
            return Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            });
        }

        let mut branches = self.branches.lock().unwrap();
        let Some(tip) = branches.get_mut(base) else {
            return Err(Error::NotFound(format!("branch '{base}'")));
        };
        let sha = format!("merge_{head}");
        tip.clone_from(&sha);
        Ok(MergeResult {
            merged: true,
            sha: Some(sha),
        })
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
