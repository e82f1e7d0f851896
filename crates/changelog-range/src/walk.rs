//! Page-by-page iteration over remote history.

use changelog_resource::{Commit, Reference};
use tracing::{debug, warn};

use crate::{FetchError, PagedCommitSource};

/// A fetched page with its anchor commit split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedPage {
    /// The commit the page was anchored at. Already accounted for by the
    /// previous page (or the start reference for the first page).
    pub anchor: Commit,
    /// The commits behind the anchor, newest first.
    pub commits: Vec<Commit>,
}

/// Iterator over the pages of history behind a start reference.
///
/// Each page is anchored at the oldest commit of the previous one, so the
/// walk never yields a commit twice as long as the source honours the
/// anchor-first contract. Iteration ends after the first page that has
/// nothing behind its anchor, after an empty page, or after a fetch error.
pub struct PageWalk<'a, S: ?Sized> {
    source: &'a S,
    /// Anchor for the next fetch; `None` once the walk is over.
    anchor: Option<Reference>,
    /// Number of fetch calls issued so far.
    pages_fetched: usize,
}

impl<'a, S: PagedCommitSource + ?Sized> PageWalk<'a, S> {
    pub fn new(source: &'a S, start: Reference) -> Self {
        Self {
            source,
            anchor: Some(start),
            pages_fetched: 0,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether another fetch would be issued by `next()`.
    pub fn is_exhausted(&self) -> bool {
        self.anchor.is_none()
    }
}

impl<S: PagedCommitSource + ?Sized> Iterator for PageWalk<'_, S> {
    type Item = Result<WalkedPage, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.anchor.take()?;
        self.pages_fetched += 1;

        let page = match self.source.fetch_page(&anchor) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };

        let Some((head, commits)) = page.split_anchor() else {
            debug!(anchor = %anchor, "empty page, history exhausted");
            return None;
        };

        if let Some(expected) = anchor.as_sha() {
            if head.sha() != expected {
                warn!(
                    anchor = %anchor,
                    first = %head.sha(),
                    "page does not start with its anchor commit"
                );
            }
        }

        debug!(
            repository = %self.source.repository(),
            anchor = %anchor,
            commits = commits.len(),
            page = self.pages_fetched,
            "fetched page"
        );

        // Continue from the oldest commit; nothing behind the anchor means
        // this was the last page.
        self.anchor = commits.last().map(|oldest| Reference::from(oldest.sha()));

        Some(Ok(WalkedPage {
            anchor: head,
            commits,
        }))
    }
}
