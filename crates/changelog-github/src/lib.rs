//! GitHub REST API sources for commit range resolution.
//!
//! `GitHubClient` lists commits (`/repos/{owner}/{repo}/commits`) as a
//! [`PagedCommitSource`](changelog_range::PagedCommitSource) and looks up pull
//! requests (`/repos/{owner}/{repo}/pulls/{number}`) as a
//! [`PullRequestSource`](changelog_range::PullRequestSource). `RemoteUrl`
//! maps git remote URLs to repository identities.

mod client;
mod config;
pub mod url;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use url::RemoteUrl;

use changelog_resource::InvalidArgument;

/// Errors raised while setting up GitHub access.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("not a GitHub remote: {0}")]
    UnsupportedHost(String),

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("invalid page size {0}, expected 1 to 100")]
    InvalidPageSize(u8),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
