//! Error types for treesame-core.

use std::path::PathBuf;

use treesame_git::Oid;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing a changelog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The histories never pass through a common tree.
    #[error("no common tree state between {from} and {to}")]
    DisjointHistory {
        /// Ref the changelog starts from.
        from: String,
        /// Ref the changelog goes to.
        to: String,
    },

    /// A commit has no ancestor with the target tree.
    #[error("no path from {start} to tree {tree}")]
    NoPath {
        /// Commit the path was searched from.
        start: Oid,
        /// Tree that was never reached.
        tree: Oid,
    },

    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error.
    #[error("{0}")]
    Git(#[from] treesame_git::Error),
}
