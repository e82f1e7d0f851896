//! Resources shared across github-changelog.
//!
//! This crate provides the validated value types the rest of the workspace
//! passes around: `Sha` and `Commit` for history, `Reference` for the
//! user-supplied start/end points, `PullRequest` and `User` for the rendered
//! output, `Repository` for the `owner/name` identity, and `Range`, the
//! ordered result of resolving a commit range.
//!
//! Every constructor validates its input and fails with [`InvalidArgument`]
//! rather than producing a partially valid value.

mod commit;
mod error;
pub mod hex;
mod pull_request;
mod range;
mod reference;
mod repository;
mod sha;

pub use commit::Commit;
pub use error::InvalidArgument;
pub use pull_request::{PullRequest, User};
pub use range::Range;
pub use reference::Reference;
pub use repository::Repository;
pub use sha::Sha;
