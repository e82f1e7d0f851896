//! Connection settings for the GitHub API.

use std::time::Duration;

use crate::GitHubError;

/// Settings shared by every request a [`GitHubClient`](crate::GitHubClient) makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise
    /// `https://ghe.example.com/api/v3`.
    pub api_url: String,
    /// Personal access token, sent as a bearer token.
    pub token: Option<String>,
    /// Commits per listing page (GitHub accepts 1 to 100).
    pub per_page: u8,
    pub user_agent: String,
    /// Timeout for a single request.
    pub timeout: Duration,
}

impl GitHubConfig {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";
    pub const MAX_PER_PAGE: u8 = 100;

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), GitHubError> {
        if self.per_page == 0 || self.per_page > Self::MAX_PER_PAGE {
            return Err(GitHubError::InvalidPageSize(self.per_page));
        }
        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            token: None,
            per_page: Self::MAX_PER_PAGE,
            user_agent: concat!("github-changelog/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_api() {
        let config = GitHubConfig::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.per_page, 100);
        assert!(config.token.is_none());
        assert!(config.user_agent.starts_with("github-changelog/"));
    }

    #[test]
    fn page_size_bounds() {
        assert!(GitHubConfig::default().with_per_page(1).validate().is_ok());
        assert!(matches!(
            GitHubConfig::default().with_per_page(0).validate(),
            Err(GitHubError::InvalidPageSize(0))
        ));
        assert!(GitHubConfig::default().with_per_page(101).validate().is_err());
    }
}
