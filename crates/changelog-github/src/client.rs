//! Blocking GitHub REST client.

use changelog_range::{FetchError, Page, PagedCommitSource, PullRequestSource};
use changelog_resource::{Commit, PullRequest, Reference, Repository, User};
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{GitHubConfig, GitHubError};

/// `GET /repos/{owner}/{repo}/commits` item.
#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

/// `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    title: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    html_url: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

impl TryFrom<CommitPayload> for Commit {
    type Error = FetchError;

    fn try_from(payload: CommitPayload) -> Result<Self, Self::Error> {
        Ok(Commit::new(&payload.sha, payload.commit.message)?)
    }
}

impl TryFrom<PullRequestPayload> for PullRequest {
    type Error = FetchError;

    fn try_from(payload: PullRequestPayload) -> Result<Self, Self::Error> {
        let author = User::with_html_url(payload.user.login, payload.user.html_url)?;
        Ok(PullRequest::new(payload.number, payload.title, author)?)
    }
}

/// Commit listing and pull-request lookups for one GitHub repository.
///
/// Uses the blocking reqwest client; do not call it from inside an async
/// runtime.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    per_page: u8,
    repository: Repository,
}

impl GitHubClient {
    pub fn new(repository: Repository, config: &GitHubConfig) -> Result<Self, GitHubError> {
        config.validate()?;

        let mut api_url = Url::parse(&config.api_url)
            .map_err(|e| GitHubError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl(config.api_url.clone()));
        }
        // Segments are appended per request; drop a trailing slash once here.
        if let Ok(mut segments) = api_url.path_segments_mut() {
            segments.pop_if_empty();
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| GitHubError::InvalidHeader("Authorization"))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url,
            per_page: config.per_page,
            repository,
        })
    }

    /// `{api}/repos/{owner}/{repo}/{segments...}`, each segment escaped.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(["repos", self.repository.owner(), self.repository.name()]);
            path.extend(segments);
        }
        url
    }

    /// Issue a GET and decode the body. A 404 or 422 comes back as `None`.
    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, FetchError> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "response");

        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(response));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Turn a non-success response into `FetchError::Status`, keeping GitHub's
/// message when the body has one.
fn status_error(response: Response) -> FetchError {
    let status = response.status();
    let rate_limited = response
        .headers()
        .get("X-RateLimit-Remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0");
    if rate_limited {
        warn!(status = status.as_u16(), "GitHub API rate limit exhausted");
    }

    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorPayload>(&body).ok())
        .map(|payload| payload.message)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();

    FetchError::Status {
        status: status.as_u16(),
        message,
    }
}

impl PagedCommitSource for GitHubClient {
    fn repository(&self) -> &Repository {
        &self.repository
    }

    fn fetch_page(&self, anchor: &Reference) -> Result<Page, FetchError> {
        let mut url = self.endpoint(&["commits"]);
        url.query_pairs_mut()
            .append_pair("sha", anchor.as_str())
            .append_pair("per_page", &self.per_page.to_string());

        let payloads: Vec<CommitPayload> = self
            .get(url)?
            .ok_or_else(|| FetchError::NotFound(anchor.to_string()))?;
        payloads.into_iter().map(Commit::try_from).collect()
    }

    fn resolve_reference(&self, reference: &Reference) -> Result<Commit, FetchError> {
        let url = self.endpoint(&["commits", reference.as_str()]);
        let payload: CommitPayload = self
            .get(url)?
            .ok_or_else(|| FetchError::NotFound(reference.to_string()))?;
        Commit::try_from(payload)
    }
}

impl PullRequestSource for GitHubClient {
    fn pull_request(&self, number: u64) -> Result<Option<PullRequest>, FetchError> {
        let url = self.endpoint(&["pulls", &number.to_string()]);
        self.get::<PullRequestPayload>(url)?
            .map(PullRequest::try_from)
            .transpose()
    }
}
