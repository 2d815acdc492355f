//! GitHub issues backend for snitch

pub mod client;
pub mod error;

pub use client::{issue_number, validate_repo, GithubTracker};
pub use error::GithubError;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";
