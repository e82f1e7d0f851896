//! Mapping the merge commits of a range to pull requests.

use std::collections::HashSet;

use changelog_resource::{Commit, PullRequest, Range, Reference, Repository};
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::{CommitRangeResolver, FetchError, PagedCommitSource, RangeError};

/// Looks up pull requests by number.
pub trait PullRequestSource {
    /// Fetch pull request `number`, or `None` when the remote does not know it.
    fn pull_request(&self, number: u64) -> Result<Option<PullRequest>, FetchError>;
}

impl<P: PullRequestSource + ?Sized> PullRequestSource for &P {
    fn pull_request(&self, number: u64) -> Result<Option<PullRequest>, FetchError> {
        (**self).pull_request(number)
    }
}

/// Recognises merge commits and extracts their pull-request number.
#[derive(Debug, Clone)]
pub struct MergeCommitMatcher {
    pattern: Regex,
}

impl MergeCommitMatcher {
    /// The summary line GitHub writes for a merged pull request.
    pub const DEFAULT_PATTERN: &'static str = r"^Merge pull request #(?P<number>\d+)";

    pub fn new() -> Result<Self, regex::Error> {
        Self::with_pattern(Self::DEFAULT_PATTERN)
    }

    /// Use a custom pattern. The number is taken from the `number` group,
    /// or the first group when there is no group of that name.
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The pull-request number referenced by `commit`'s summary line.
    pub fn pull_request_number(&self, commit: &Commit) -> Option<u64> {
        let captures = self.pattern.captures(commit.summary())?;
        let number = captures.name("number").or_else(|| captures.get(1))?;
        number.as_str().parse().ok().filter(|&n| n > 0)
    }
}

/// Resolve the range between `start` and `end` and attach the pull requests
/// merged in it.
///
/// Without an `end`, all history behind `start` is scanned. Pull requests
/// are looked up in parallel and kept in commit order, newest first; numbers
/// the remote does not know are skipped.
pub fn collect_pull_requests<S, P>(
    resolver: &CommitRangeResolver<S>,
    pulls: &P,
    matcher: &MergeCommitMatcher,
    start: &Reference,
    end: Option<&Reference>,
) -> Result<Range, RangeError>
where
    S: PagedCommitSource,
    P: PullRequestSource + Sync + ?Sized,
{
    let range = match end {
        Some(end) => resolver.resolve(start, end)?,
        None => resolver.resolve_open(start)?,
    };

    let mut seen = HashSet::new();
    let numbers: Vec<u64> = range
        .commits()
        .iter()
        .filter_map(|commit| matcher.pull_request_number(commit))
        .filter(|number| seen.insert(*number))
        .collect();
    debug!(
        commits = range.len(),
        merges = numbers.len(),
        "matched merge commits"
    );

    let repository = resolver.source().repository();
    let found = numbers
        .par_iter()
        .map(|&number| lookup(pulls, repository, number))
        .collect::<Result<Vec<_>, _>>()?;

    found
        .into_iter()
        .flatten()
        .try_fold(range, |range, pull_request| {
            range.with_pull_request(pull_request).map_err(RangeError::from)
        })
}

fn lookup<P>(
    pulls: &P,
    repository: &Repository,
    number: u64,
) -> Result<Option<PullRequest>, RangeError>
where
    P: PullRequestSource + ?Sized,
{
    match pulls.pull_request(number) {
        Ok(Some(pull_request)) => Ok(Some(pull_request)),
        Ok(None) => {
            warn!(repository = %repository, number, "pull request not found, skipping");
            Ok(None)
        }
        Err(cause) => Err(RangeError::PullRequest {
            repository: repository.clone(),
            number,
            cause,
        }),
    }
}
