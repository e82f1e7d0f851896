use std::fmt;
use std::str::FromStr;

use crate::{InvalidArgument, Sha};

/// A user-supplied point in history: a commit sha, a tag, or a branch.
///
/// The only invariant is non-emptiness; resolving symbolic names is left to
/// the remote history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidArgument> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(InvalidArgument::EmptyReference);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the reference as a full commit sha.
    ///
    /// Accepts either case, since users paste hashes from many places.
    /// Returns `None` for symbolic names and abbreviated hashes.
    pub fn as_sha(&self) -> Option<Sha> {
        if self.0.len() != Sha::HEX_LEN {
            return None;
        }
        Sha::from_hex(&self.0.to_ascii_lowercase()).ok()
    }
}

impl From<Sha> for Reference {
    fn from(sha: Sha) -> Self {
        Self(sha.to_hex())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Reference {
    type Err = InvalidArgument;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
