//! Commit range resolution: fold pages until the end reference turns up.

use std::time::{Duration, Instant};

use changelog_resource::{Range, Reference, Sha};
use tracing::{debug, info};

use crate::{FetchError, PageWalk, PagedCommitSource, RangeError, WalkedPage};

/// Limits that keep a walk from running forever against a misbehaving or
/// very deep history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum number of pages fetched per walk (`None` = unbounded).
    pub max_pages: Option<usize>,
    /// Wall-clock budget per walk, checked before each page fetch.
    pub deadline: Option<Duration>,
}

impl ResolveOptions {
    pub const DEFAULT_MAX_PAGES: usize = 100;

    /// No page limit and no deadline.
    pub fn unbounded() -> Self {
        Self {
            max_pages: None,
            deadline: None,
        }
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_pages: Some(Self::DEFAULT_MAX_PAGES),
            deadline: None,
        }
    }
}

/// Resolves the commits between two references using only a paged listing.
///
/// `resolve(start, end)` returns the commits strictly behind `start` up to
/// and including `end`, newest first. Each call owns its own accumulator, so
/// a resolver over a `Sync` source can be shared between threads.
#[derive(Debug, Clone)]
pub struct CommitRangeResolver<S> {
    source: S,
    options: ResolveOptions,
}

impl<S: PagedCommitSource> CommitRangeResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ResolveOptions::default())
    }

    pub fn with_options(source: S, options: ResolveOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve the commits after `start` up to and including `end`.
    ///
    /// Identical references short-circuit to an empty range without any
    /// fetch. Running out of history before `end` is found fails with
    /// [`RangeError::RangeNotFound`]; a partial range is never returned.
    pub fn resolve(&self, start: &Reference, end: &Reference) -> Result<Range, RangeError> {
        if start == end {
            debug!(reference = %start, "start and end are identical, empty range");
            return Ok(Range::new());
        }

        let target = self.target_sha(start, end)?;
        let started = Instant::now();
        let mut walk = PageWalk::new(&self.source, start.clone());
        let mut range = Range::new();

        loop {
            // Exhaustion takes precedence over a spent budget.
            if walk.is_exhausted() {
                return Err(self.not_found(start, end, None));
            }
            self.check_budget(&walk, started, start)?;

            let page = match walk.next() {
                Some(Ok(page)) => page,
                Some(Err(e)) => return Err(self.not_found(start, end, Some(e))),
                None => return Err(self.not_found(start, end, None)),
            };

            // `start` and `end` may name the same commit in different ways.
            if walk.pages_fetched() == 1 && page.anchor.sha() == target {
                debug!(start = %start, end = %end, "references name the same commit, empty range");
                return Ok(range);
            }

            let (next, found) = self.fold_page(range, page, start, Some(target))?;
            range = next;
            if found {
                info!(
                    repository = %self.source.repository(),
                    start = %start,
                    end = %end,
                    commits = range.len(),
                    pages = walk.pages_fetched(),
                    "resolved commit range"
                );
                return Ok(range);
            }
        }
    }

    /// Collect every commit behind `start`, down to the root commit.
    ///
    /// Unlike [`resolve`](Self::resolve), running out of history is the
    /// expected way for this walk to end.
    pub fn resolve_open(&self, start: &Reference) -> Result<Range, RangeError> {
        let started = Instant::now();
        let mut walk = PageWalk::new(&self.source, start.clone());
        let mut range = Range::new();

        while !walk.is_exhausted() {
            self.check_budget(&walk, started, start)?;

            let page = match walk.next() {
                Some(Ok(page)) => page,
                Some(Err(cause)) => {
                    return Err(RangeError::HistoryUnavailable {
                        repository: self.source.repository().clone(),
                        start: start.to_string(),
                        cause,
                    })
                }
                None => break,
            };
            range = self.fold_page(range, page, start, None)?.0;
        }

        info!(
            repository = %self.source.repository(),
            start = %start,
            commits = range.len(),
            pages = walk.pages_fetched(),
            "collected history"
        );
        Ok(range)
    }

    /// The sha the walk stops at: taken from `end` directly when it is a full
    /// hash, otherwise resolved once through the source.
    fn target_sha(&self, start: &Reference, end: &Reference) -> Result<Sha, RangeError> {
        if let Some(sha) = end.as_sha() {
            return Ok(sha);
        }
        match self.source.resolve_reference(end) {
            Ok(commit) => {
                debug!(end = %end, sha = %commit.sha(), "resolved end reference");
                Ok(commit.sha())
            }
            Err(e) => Err(self.not_found(start, end, Some(e))),
        }
    }

    /// Append the commits of one page, stopping after `target`.
    ///
    /// Returns the extended range and whether `target` was reached.
    fn fold_page(
        &self,
        mut range: Range,
        page: WalkedPage,
        start: &Reference,
        target: Option<Sha>,
    ) -> Result<(Range, bool), RangeError> {
        for commit in page.commits {
            let sha = commit.sha();
            if range.contains(&sha) {
                return Err(RangeError::InconsistentHistory {
                    repository: self.source.repository().clone(),
                    start: start.to_string(),
                    sha,
                });
            }
            range = range.with_commit(commit)?;
            if Some(sha) == target {
                return Ok((range, true));
            }
        }
        Ok((range, false))
    }

    /// Fail before the next fetch if the page or time budget is spent.
    fn check_budget(
        &self,
        walk: &PageWalk<'_, S>,
        started: Instant,
        start: &Reference,
    ) -> Result<(), RangeError> {
        if let Some(max_pages) = self.options.max_pages {
            if walk.pages_fetched() >= max_pages {
                return Err(RangeError::PageLimitExceeded {
                    repository: self.source.repository().clone(),
                    start: start.to_string(),
                    pages: walk.pages_fetched(),
                });
            }
        }
        if let Some(deadline) = self.options.deadline {
            if started.elapsed() >= deadline {
                return Err(RangeError::DeadlineExceeded {
                    repository: self.source.repository().clone(),
                    start: start.to_string(),
                    deadline,
                });
            }
        }
        Ok(())
    }

    fn not_found(
        &self,
        start: &Reference,
        end: &Reference,
        cause: Option<FetchError>,
    ) -> RangeError {
        if let Some(ref e) = cause {
            debug!(start = %start, end = %end, error = %e, "page fetch failed, treating as exhausted");
        }
        RangeError::range_not_found(self.source.repository(), start.as_str(), end.as_str(), cause)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use changelog_resource::{Commit, Repository};

    use super::*;
    use crate::Page;

    fn commit(n: u8) -> Commit {
        Commit::new(&format!("{:040x}", n), format!("commit {n}")).unwrap()
    }

    fn reference(n: u8) -> Reference {
        Reference::from(commit(n).sha())
    }

    fn shas(range: &Range) -> Vec<Sha> {
        range.commits().iter().map(Commit::sha).collect()
    }

    /// Linear history `top, top-1, ..., 1` served `per_page` commits at a
    /// time. Tags map symbolic names to commits; fetches are counted.
    struct Linear {
        repository: Repository,
        top: u8,
        per_page: usize,
        tags: HashMap<String, u8>,
        fetches: Cell<usize>,
    }

    impl Linear {
        fn new(top: u8, per_page: usize) -> Self {
            Self {
                repository: Repository::parse("octo/repo").unwrap(),
                top,
                per_page,
                tags: HashMap::new(),
                fetches: Cell::new(0),
            }
        }

        fn tag(mut self, name: &str, n: u8) -> Self {
            self.tags.insert(name.to_string(), n);
            self
        }

        fn lookup(&self, anchor: &Reference) -> Option<u8> {
            if let Some(&n) = self.tags.get(anchor.as_str()) {
                return Some(n);
            }
            let sha = anchor.as_sha()?;
            (1..=self.top).find(|&n| commit(n).sha() == sha)
        }
    }

    impl PagedCommitSource for Linear {
        fn repository(&self) -> &Repository {
            &self.repository
        }

        fn fetch_page(&self, anchor: &Reference) -> Result<Page, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            let Some(n) = self.lookup(anchor) else {
                return Err(FetchError::NotFound(anchor.to_string()));
            };
            Ok((1..=n).rev().take(self.per_page).map(commit).collect())
        }
    }

    #[test]
    fn identical_references_make_no_fetch() {
        let source = Linear::new(10, 5);
        let resolver = CommitRangeResolver::new(&source);
        let range = resolver.resolve(&reference(7), &reference(7)).unwrap();
        assert!(range.is_empty());
        assert_eq!(source.fetches.get(), 0);
    }

    #[test]
    fn end_within_first_page() {
        let source = Linear::new(10, 5);
        let range = CommitRangeResolver::new(&source)
            .resolve(&reference(10), &reference(8))
            .unwrap();
        assert_eq!(shas(&range), vec![commit(9).sha(), commit(8).sha()]);
        assert_eq!(source.fetches.get(), 1);
    }

    #[test]
    fn end_on_a_later_page_skips_overlap() {
        let source = Linear::new(10, 3);
        let range = CommitRangeResolver::new(&source)
            .resolve(&reference(10), &reference(5))
            .unwrap();
        let expected: Vec<_> = (5..=9).rev().map(|n| commit(n).sha()).collect();
        assert_eq!(shas(&range), expected);
        // pages anchored at 10, 8 and 6
        assert_eq!(source.fetches.get(), 3);
    }

    #[test]
    fn end_never_reached_is_range_not_found() {
        let source = Linear::new(6, 4);
        let end = Reference::from(commit(42).sha());
        let err = CommitRangeResolver::new(&source)
            .resolve(&reference(6), &end)
            .unwrap_err();
        assert!(matches!(err, RangeError::RangeNotFound { cause: None, .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "Could not find a range of commits between \"{}\" and \"{}\" in \"octo/repo\".",
                reference(6),
                end
            )
        );
    }

    #[test]
    fn end_newer_than_start_is_range_not_found() {
        let source = Linear::new(10, 20);
        let err = CommitRangeResolver::new(&source)
            .resolve(&reference(4), &reference(9))
            .unwrap_err();
        assert!(matches!(err, RangeError::RangeNotFound { .. }));
    }

    #[test]
    fn symbolic_end_is_resolved_once() {
        let source = Linear::new(10, 3).tag("v1.0.0", 6).tag("v1.1.0", 9);
        let start = Reference::new("v1.1.0").unwrap();
        let end = Reference::new("v1.0.0").unwrap();
        let range = CommitRangeResolver::new(&source).resolve(&start, &end).unwrap();
        assert_eq!(
            shas(&range),
            vec![commit(8).sha(), commit(7).sha(), commit(6).sha()]
        );
        // one lookup for the end, then pages anchored at v1.1.0 and 7
        assert_eq!(source.fetches.get(), 3);
    }

    #[test]
    fn unknown_symbolic_end_keeps_cause() {
        let source = Linear::new(10, 4);
        let err = CommitRangeResolver::new(&source)
            .resolve(&reference(10), &Reference::new("v0.0.1").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            RangeError::RangeNotFound { cause: Some(FetchError::NotFound(_)), .. }
        ));
    }

    #[test]
    fn differently_named_same_commit_is_empty() {
        let source = Linear::new(10, 4).tag("v2.0.0", 7);
        let range = CommitRangeResolver::new(&source)
            .resolve(&Reference::new("v2.0.0").unwrap(), &reference(7))
            .unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn fetch_failure_is_range_not_found_with_cause() {
        let source = Linear::new(10, 4);
        let err = CommitRangeResolver::new(&source)
            .resolve(&Reference::new("does-not-exist").unwrap(), &reference(1))
            .unwrap_err();
        match err {
            RangeError::RangeNotFound { cause: Some(FetchError::NotFound(r)), .. } => {
                assert_eq!(r, "does-not-exist")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn page_limit_stops_the_walk() {
        let source = Linear::new(50, 2);
        let options = ResolveOptions {
            max_pages: Some(3),
            deadline: None,
        };
        let err = CommitRangeResolver::with_options(&source, options)
            .resolve(&reference(50), &reference(1))
            .unwrap_err();
        assert!(matches!(err, RangeError::PageLimitExceeded { pages: 3, .. }));
        assert_eq!(source.fetches.get(), 3);
    }

    #[test]
    fn spent_deadline_fails_before_fetching() {
        let source = Linear::new(10, 4);
        let options = ResolveOptions {
            max_pages: None,
            deadline: Some(Duration::ZERO),
        };
        let err = CommitRangeResolver::with_options(&source, options)
            .resolve(&reference(10), &reference(2))
            .unwrap_err();
        assert!(matches!(err, RangeError::DeadlineExceeded { .. }));
        assert_eq!(source.fetches.get(), 0);
    }

    /// Lists commit 3 again on the page after it.
    struct Looping(Repository);

    impl PagedCommitSource for Looping {
        fn repository(&self) -> &Repository {
            &self.0
        }

        fn fetch_page(&self, anchor: &Reference) -> Result<Page, FetchError> {
            if *anchor == reference(9) {
                Ok(vec![commit(9), commit(8), commit(3)].into())
            } else {
                Ok(vec![commit(3), commit(2), commit(3)].into())
            }
        }
    }

    #[test]
    fn repeated_commit_is_inconsistent_history() {
        let source = Looping(Repository::parse("octo/repo").unwrap());
        let err = CommitRangeResolver::new(&source)
            .resolve(&reference(9), &reference(1))
            .unwrap_err();
        match err {
            RangeError::InconsistentHistory { sha, .. } => assert_eq!(sha, commit(3).sha()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn open_range_runs_to_the_root() {
        let source = Linear::new(7, 3);
        let range = CommitRangeResolver::new(&source)
            .resolve_open(&reference(7))
            .unwrap();
        let expected: Vec<_> = (1..=6).rev().map(|n| commit(n).sha()).collect();
        assert_eq!(shas(&range), expected);
    }

    #[test]
    fn open_range_of_unknown_start_is_unavailable() {
        let source = Linear::new(7, 3);
        let err = CommitRangeResolver::new(&source)
            .resolve_open(&Reference::new("nope").unwrap())
            .unwrap_err();
        assert!(matches!(err, RangeError::HistoryUnavailable { .. }));
    }

    #[test]
    fn default_options_bound_pages() {
        assert_eq!(ResolveOptions::default().max_pages, Some(100));
        assert_eq!(ResolveOptions::unbounded().max_pages, None);
    }
}
