use std::fmt;
use std::str::FromStr;

use crate::InvalidArgument;

/// Maximum length of a GitHub user or organization name.
const MAX_OWNER_LEN: usize = 39;

/// A GitHub repository identity: `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    pub fn from_owner_and_name(
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        let owner = owner.into();
        let name = name.into();
        if !is_valid_owner(&owner) || !is_valid_name(&name) {
            return Err(InvalidArgument::Repository(format!("{owner}/{name}")));
        }
        Ok(Self { owner, name })
    }

    /// Parse `owner/name`.
    pub fn parse(value: &str) -> Result<Self, InvalidArgument> {
        let (owner, name) = value
            .split_once('/')
            .ok_or_else(|| InvalidArgument::Repository(value.to_string()))?;
        Self::from_owner_and_name(owner, name)
            .map_err(|_| InvalidArgument::Repository(value.to_string()))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = InvalidArgument;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Alphanumerics separated by single hyphens, no leading or trailing hyphen.
fn is_valid_owner(owner: &str) -> bool {
    if owner.is_empty() || owner.len() > MAX_OWNER_LEN {
        return false;
    }
    if owner.starts_with('-') || owner.ends_with('-') || owner.contains("--") {
        return false;
    }
    owner.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}
