//! Commit range resolution over a paginated, anchor-based commit listing.
//!
//! Remote hosts such as GitHub only expose history as "the commits behind X,
//! newest first, one page at a time". This crate turns that primitive into
//! the exact list of commits between two references: `PageWalk` iterates the
//! pages, stripping the anchor commit each page repeats; `CommitRangeResolver`
//! folds the pages into a `Range` and stops at the end reference, failing
//! with `RangeError::RangeNotFound` when history runs out first. The `pulls`
//! module then maps the merge commits of a range to pull requests.

mod pulls;
mod resolver;
mod source;
mod walk;

use std::time::Duration;

use changelog_resource::{InvalidArgument, Repository, Sha};

pub use pulls::{collect_pull_requests, MergeCommitMatcher, PullRequestSource};
pub use resolver::{CommitRangeResolver, ResolveOptions};
pub use source::{FetchError, Page, PagedCommitSource};
pub use walk::{PageWalk, WalkedPage};

/// Errors produced while resolving a commit range.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    /// History ran out (or could not be listed) before the end reference
    /// was found. A fetch failure that ended the walk is kept as the source.
    #[error("Could not find a range of commits between \"{start}\" and \"{end}\" in \"{repository}\".")]
    RangeNotFound {
        repository: Repository,
        start: String,
        end: String,
        #[source]
        cause: Option<FetchError>,
    },

    #[error("Could not list the commits behind \"{start}\" in \"{repository}\".")]
    HistoryUnavailable {
        repository: Repository,
        start: String,
        #[source]
        cause: FetchError,
    },

    #[error("Gave up walking the history of \"{repository}\" from \"{start}\" after {pages} pages.")]
    PageLimitExceeded {
        repository: Repository,
        start: String,
        pages: usize,
    },

    #[error("Gave up walking the history of \"{repository}\" from \"{start}\" after {deadline:?}.")]
    DeadlineExceeded {
        repository: Repository,
        start: String,
        deadline: Duration,
    },

    #[error("The history of \"{repository}\" listed commit {sha} twice while walking from \"{start}\".")]
    InconsistentHistory {
        repository: Repository,
        start: String,
        sha: Sha,
    },

    #[error("Could not fetch pull request #{number} from \"{repository}\".")]
    PullRequest {
        repository: Repository,
        number: u64,
        #[source]
        cause: FetchError,
    },

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl RangeError {
    /// Build the user-facing "no such range" failure.
    pub fn range_not_found(
        repository: &Repository,
        start: impl Into<String>,
        end: impl Into<String>,
        cause: Option<FetchError>,
    ) -> Self {
        Self::RangeNotFound {
            repository: repository.clone(),
            start: start.into(),
            end: end.into(),
            cause,
        }
    }
}
