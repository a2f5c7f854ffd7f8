//! Run configuration
//!
//! Inputs arrive as raw text (action inputs or CLI flags) and are
//! validated once, before any API call is made.

use crate::error::{Error, Result};
use crate::types::{FilterOptions, MergeOrder};
use std::fmt;
use std::str::FromStr;

/// Repository identifier in `owner/repo` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Config(format!("Invalid repository '{s}', expected 'owner/repo'"));

        let (owner, repo) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Raw, unvalidated inputs
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Authentication token
    pub token: Option<String>,
    /// `owner/repo`
    pub repository: Option<String>,
    /// Raw `skipsChecked` input
    pub skips_checked: Option<String>,
    /// Raw `allStepsPass` input
    pub all_steps_pass: Option<String>,
    /// Raw `includeLabel` input
    pub include_label: Option<String>,
    /// Raw `ignoreLabel` input
    pub ignore_label: Option<String>,
    /// Raw `sortByNumber` input
    pub sort_by_number: Option<String>,
    /// API base URL override
    pub api_url: Option<String>,
}

/// Validated configuration for one run
#[derive(Clone)]
pub struct CombineConfig {
    /// Authentication token (never empty)
    pub token: String,
    /// Target repository
    pub repository: RepoSlug,
    /// PR filters
    pub filter: FilterOptions,
    /// Merge order policy
    pub merge_order: MergeOrder,
    /// API base URL override
    pub api_url: Option<String>,
}

// Keep the token out of logs.
impl fmt::Debug for CombineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineConfig")
            .field("token", &"***")
            .field("repository", &self.repository)
            .field("filter", &self.filter)
            .field("merge_order", &self.merge_order)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TryFrom<ActionInputs> for CombineConfig {
    type Error = Error;

    fn try_from(inputs: ActionInputs) -> Result<Self> {
        let token = non_empty(inputs.token).ok_or_else(|| {
            Error::Config("Input required and not supplied: token".to_string())
        })?;

        let repository: RepoSlug = non_empty(inputs.repository)
            .ok_or_else(|| Error::Config("Repository not set (expected GITHUB_REPOSITORY)".to_string()))?
            .parse()?;

        let filter = FilterOptions {
            require_all_checks_pass: parse_flag(inputs.all_steps_pass.as_deref()),
            accept_skipped_checks: parse_flag(inputs.skips_checked.as_deref()),
            required_label: non_empty(inputs.include_label),
            excluded_label: non_empty(inputs.ignore_label),
        };

        let merge_order = if parse_flag(inputs.sort_by_number.as_deref()) {
            MergeOrder::PrNumber
        } else {
            MergeOrder::ListOrder
        };

        Ok(Self {
            token,
            repository,
            filter,
            merge_order,
            api_url: non_empty(inputs.api_url),
        })
    }
}

/// Boolean inputs are only set by the exact text `true`.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Treat empty (or whitespace-only) input as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
