//! The paginated commit listing consumed by the resolver.

use changelog_resource::{Commit, InvalidArgument, Reference, Repository};

/// Errors a page source reports for a single fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("unknown reference: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// One batch of commits, newest first, as returned for a single anchor.
///
/// By contract the first commit is the anchor's own commit; everything
/// after it is history behind the anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    commits: Vec<Commit>,
}

impl Page {
    pub fn new(commits: Vec<Commit>) -> Self {
        Self { commits }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The commit the page was anchored at.
    pub fn anchor(&self) -> Option<&Commit> {
        self.commits.first()
    }

    /// Split into the anchor's commit and the commits behind it.
    ///
    /// Returns `None` for an empty page.
    pub fn split_anchor(self) -> Option<(Commit, Vec<Commit>)> {
        let mut commits = self.commits.into_iter();
        let anchor = commits.next()?;
        Some((anchor, commits.collect()))
    }
}

impl From<Vec<Commit>> for Page {
    fn from(commits: Vec<Commit>) -> Self {
        Self::new(commits)
    }
}

impl FromIterator<Commit> for Page {
    fn from_iter<I: IntoIterator<Item = Commit>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A remote history that lists commits one page at a time.
///
/// Implementations must be deterministic for a fixed repository state.
/// Sources shared between threads must also be `Sync`.
pub trait PagedCommitSource {
    /// The repository this source lists, used in diagnostics.
    fn repository(&self) -> &Repository;

    /// Fetch the commits starting at `anchor`, newest first.
    ///
    /// The first commit of a non-empty page is the anchor's own commit. An
    /// empty page means there is no history at that anchor.
    fn fetch_page(&self, anchor: &Reference) -> Result<Page, FetchError>;

    /// Resolve a reference (sha, tag or branch) to its commit.
    fn resolve_reference(&self, reference: &Reference) -> Result<Commit, FetchError> {
        self.fetch_page(reference)?
            .split_anchor()
            .map(|(anchor, _)| anchor)
            .ok_or_else(|| FetchError::NotFound(reference.to_string()))
    }
}

impl<S: PagedCommitSource + ?Sized> PagedCommitSource for &S {
    fn repository(&self) -> &Repository {
        (**self).repository()
    }

    fn fetch_page(&self, anchor: &Reference) -> Result<Page, FetchError> {
        (**self).fetch_page(anchor)
    }

    fn resolve_reference(&self, reference: &Reference) -> Result<Commit, FetchError> {
        (**self).resolve_reference(reference)
    }
}
