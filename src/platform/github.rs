//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CombinedStatus, MergeResult, PlatformConfig, PullRequest, PullRequestSummary};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::repos::Object;
use octocrab::params::repos::Reference;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Serialize)]
struct MergeRequest<'a> {
    base: &'a str,
    head: &'a str,
    commit_message: &'a str,
}

#[derive(Deserialize)]
struct MergeCommit {
    sha: String,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (status and merge endpoints)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = if let Some(ref url) = api_url {
            builder = builder
                .base_uri(url.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            url.trim_end_matches('/').to_string()
        } else {
            DEFAULT_API_URL.to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("snyk-combine")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_url,
            },
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Build a raw request against a repository-scoped endpoint
    fn repo_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        );

        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// HTTP status carried by an octocrab error, if it came from the API
fn api_status(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Helper to convert octocrab PR to our `PullRequestSummary` type
fn summary_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestSummary {
    PullRequestSummary {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        head_ref: pr.head.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>> {
        debug!("listing open PRs");
        let page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await?;

        let result: Vec<PullRequestSummary> = page.items.iter().map(summary_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_combined_status(&self, sha: &str) -> Result<CombinedStatus> {
        debug!(sha, "fetching combined status");
        let response = self
            .repo_request(Method::GET, &format!("commits/{sha}/status"))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch commit status: {e}")))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(Error::NotFound(format!("commit {sha}"))),
            status => {
                return Err(Error::GitHubApi(format!(
                    "Commit status request failed with {status}"
                )));
            }
        }

        let status: CombinedStatus = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse commit status: {e}")))?;

        debug!(sha, state = %status.state, count = status.total_count, "combined status");
        Ok(status)
    }

    async fn get_branch_sha(&self, branch: &str) -> Result<String> {
        debug!(branch, "resolving branch");
        let git_ref = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await
            .map_err(|e| match api_status(&e) {
                Some(404) => Error::NotFound(format!("branch '{branch}'")),
                _ => Error::from(e),
            })?;

        // Object is non-exhaustive upstream
        #[allow(unreachable_patterns)]
        let sha = match git_ref.object {
            Object::Commit { sha, .. } | Object::Tag { sha, .. } => sha,
            _ => {
                return Err(Error::GitHubApi(format!(
                    "Unexpected object type for branch '{branch}'"
                )));
            }
        };

        debug!(branch, sha = %sha, "resolved branch");
        Ok(sha)
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<()> {
        debug!(name, sha, "creating branch");
        self.client
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(name.to_string()), sha)
            .await
            .map_err(|e| match api_status(&e) {
                Some(422) => Error::BranchExists(name.to_string()),
                Some(404) => Error::NotFound(format!("commit {sha}")),
                _ => Error::from(e),
            })?;

        debug!(name, "created branch");
        Ok(())
    }

    async fn merge_branch(
        &self,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<MergeResult> {
        debug!(base, head, "merging branch");
        let response = self
            .repo_request(Method::POST, "merges")
            .json(&MergeRequest {
                base,
                head,
                commit_message,
            })
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge request failed: {e}")))?;

        let result = match response.status() {
            StatusCode::CREATED => {
                let commit: MergeCommit = response
                    .json()
                    .await
                    .map_err(|e| Error::GitHubApi(format!("Failed to parse merge commit: {e}")))?;
                MergeResult {
                    merged: true,
                    sha: Some(commit.sha),
                }
            }
            StatusCode::NO_CONTENT => MergeResult {
                merged: false,
                sha: None,
            },
            StatusCode::CONFLICT => {
                return Err(Error::MergeConflict {
                    base: base.to_string(),
                    head: head.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound(format!("base '{base}' or head '{head}'")));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::GitHubApi(format!("Merge failed ({status}): {body}")));
            }
        };

        debug!(base, head, merged = result.merged, sha = ?result.sha, "merge complete");
        Ok(result)
    }

    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .body(body)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
