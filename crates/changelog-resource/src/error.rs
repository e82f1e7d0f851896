/// Errors produced when a resource is constructed from invalid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("Sha \"{0}\" does not appear to be a valid sha1 hash.")]
    Sha(String),

    #[error("Number \"{0}\" does not appear to be a valid pull request number.")]
    PullRequestNumber(u64),

    #[error("Repository \"{0}\" appears to be invalid.")]
    Repository(String),

    #[error("Reference must not be empty.")]
    EmptyReference,

    #[error("Login must not be empty.")]
    EmptyLogin,

    #[error("Commit \"{0}\" is already part of the range.")]
    DuplicateCommit(String),

    #[error("Pull request \"{0}\" is already part of the range.")]
    DuplicatePullRequest(u64),
}
