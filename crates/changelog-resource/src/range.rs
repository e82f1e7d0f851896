use std::collections::HashSet;

use crate::{Commit, InvalidArgument, PullRequest, Sha};

/// The commits between two references, and the pull requests merged by them.
///
/// Commits are kept in discovery order (newest first) and never repeat a
/// sha. The range is built by value with `with_commit` / `with_pull_request`
/// and is read-only once handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Range {
    commits: Vec<Commit>,
    pull_requests: Vec<PullRequest>,
    seen: HashSet<Sha>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn pull_requests(&self) -> &[PullRequest] {
        &self.pull_requests
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Whether a commit with this sha is already part of the range.
    pub fn contains(&self, sha: &Sha) -> bool {
        self.seen.contains(sha)
    }

    /// Append a commit, rejecting one whose sha is already present.
    pub fn with_commit(mut self, commit: Commit) -> Result<Self, InvalidArgument> {
        if !self.seen.insert(commit.sha()) {
            return Err(InvalidArgument::DuplicateCommit(commit.sha().to_hex()));
        }
        self.commits.push(commit);
        Ok(self)
    }

    /// Append a pull request, rejecting a number that is already present.
    pub fn with_pull_request(mut self, pull_request: PullRequest) -> Result<Self, InvalidArgument> {
        let number = pull_request.number();
        if self.pull_requests.iter().any(|pr| pr.number() == number) {
            return Err(InvalidArgument::DuplicatePullRequest(number));
        }
        self.pull_requests.push(pull_request);
        Ok(self)
    }
}
