//! Git remote URL parsing.
//!
//! Recognises the URL forms git prints for a GitHub remote:
//! - https://[user@]github.com/owner/repo[.git]
//! - ssh://git@github.com[:port]/owner/repo.git
//! - git://github.com/owner/repo.git
//! - git@github.com:owner/repo.git (SCP-like SSH)

use std::fmt;
use std::str::FromStr;

use changelog_resource::Repository;

use crate::GitHubError;

const GITHUB_HOST: &str = "github.com";

/// A remote URL pointing at a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    url: String,
    repository: Repository,
}

impl RemoteUrl {
    /// Parse a git remote URL and extract the repository it points at.
    pub fn parse(url: &str) -> Result<Self, GitHubError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GitHubError::InvalidUrl("empty URL".into()));
        }

        let (host, path) = split_host_and_path(url)?;
        if !host.eq_ignore_ascii_case(GITHUB_HOST) {
            return Err(GitHubError::UnsupportedHost(url.to_string()));
        }

        let repository = repository_from_path(path).ok_or_else(|| {
            GitHubError::InvalidUrl(format!("no owner/repository in URL: {}", url))
        })??;

        Ok(Self {
            url: url.to_string(),
            repository,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn into_repository(self) -> Repository {
        self.repository
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl FromStr for RemoteUrl {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split into host (without user or port) and repository path.
fn split_host_and_path(url: &str) -> Result<(&str, &str), GitHubError> {
    for scheme in ["https://", "http://", "ssh://", "git://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            let (authority, path) = rest
                .split_once('/')
                .ok_or_else(|| GitHubError::InvalidUrl(format!("no path in URL: {}", url)))?;
            let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
            let host = host_port.split_once(':').map_or(host_port, |(h, _)| h);
            return Ok((host, path));
        }
    }

    if url.contains("://") {
        return Err(GitHubError::InvalidUrl(format!("unsupported scheme: {}", url)));
    }

    // SCP-like syntax: [user@]host:path
    let (host_part, path) = url
        .split_once(':')
        .ok_or_else(|| GitHubError::InvalidUrl(format!("could not parse URL: {}", url)))?;
    let host = host_part.rsplit_once('@').map_or(host_part, |(_, h)| h);
    if host.is_empty() {
        return Err(GitHubError::InvalidUrl(format!(
            "empty host in SCP-like URL: {}",
            url
        )));
    }
    Ok((host, path))
}

/// `owner/repo[.git][/]` to a Repository; `None` when the path has the
/// wrong shape.
fn repository_from_path(path: &str) -> Option<Result<Repository, GitHubError>> {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, name) = path.split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(Repository::from_owner_and_name(owner, name).map_err(GitHubError::from))
}
