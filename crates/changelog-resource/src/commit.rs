use std::hash::{Hash, Hasher};

use crate::{InvalidArgument, Sha};

/// A single commit as listed by the remote history.
///
/// Identity is the sha alone: two commits with the same sha are equal no
/// matter what their messages say.
#[derive(Debug, Clone)]
pub struct Commit {
    sha: Sha,
    message: String,
}

impl Commit {
    /// Create a commit from a hex sha and its message.
    pub fn new(sha: &str, message: impl Into<String>) -> Result<Self, InvalidArgument> {
        Ok(Self::from_sha(Sha::from_hex(sha)?, message))
    }

    /// Create a commit from an already validated sha.
    pub fn from_sha(sha: Sha, message: impl Into<String>) -> Self {
        Self {
            sha,
            message: message.into(),
        }
    }

    pub fn sha(&self) -> Sha {
        self.sha
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.sha == other.sha
    }
}

impl Eq for Commit {}

impl Hash for Commit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sha.hash(state);
    }
}
