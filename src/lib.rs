//! snyk-combine: fold open Snyk upgrade PRs into one combined PR
//!
//! Lists the open pull requests of a GitHub repository, keeps the ones
//! opened by the Snyk upgrade bot that pass the configured label and CI
//! filters, merges their branches into a fresh integration branch and
//! opens a single pull request for it.

pub mod combine;
pub mod config;
pub mod error;
pub mod platform;
pub mod types;
