//! Error types for treesame-git.

use std::path::PathBuf;

use git2::Oid;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading the commit graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No repository at the given path or any parent.
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// Reference could not be resolved.
    #[error("reference not found: {0}")]
    RefNotFound(String),

    /// Reference resolves to something other than a commit.
    #[error("reference does not point at a commit: {0}")]
    NotACommit(String),

    /// Commit id not present in the object database.
    #[error("commit not found: {0}")]
    CommitNotFound(Oid),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
