//! Trait abstraction for read-only commit graph access.
//!
//! This module defines the `CommitSource` trait, the only interface the
//! changelog algorithms use to talk to version control.

use std::rc::Rc;

use git2::Oid;

use crate::{Author, CommitMeta, Result};

/// Read-only queries over a commit graph.
///
/// This trait abstracts the backend, allowing for:
/// - Dependency injection in the changelog algorithms
/// - In-memory graphs for testing
///
/// Implementations are expected to memoize: the algorithms ask for the same
/// commit many times and rely on repeated reads being cheap.
#[allow(clippy::missing_errors_doc)]
pub trait CommitSource {
    /// Resolve a ref (branch, tag, full or abbreviated id) to a commit id.
    fn resolve(&self, spec: &str) -> Result<Oid>;

    /// Read a commit's metadata.
    fn commit(&self, id: Oid) -> Result<Rc<CommitMeta>>;

    /// Paths touched by a commit relative to its first parent.
    ///
    /// Root commits are compared against the empty tree.
    fn changed_paths(&self, id: Oid) -> Result<Rc<[String]>>;

    /// Tree id of a commit.
    fn tree_of(&self, id: Oid) -> Result<Oid> {
        Ok(self.commit(id)?.tree)
    }

    /// Parent ids of a commit, in declaration order.
    fn parents_of(&self, id: Oid) -> Result<Vec<Oid>> {
        Ok(self.commit(id)?.parents.clone())
    }

    /// Subject line of a commit.
    fn subject_of(&self, id: Oid) -> Result<String> {
        Ok(self.commit(id)?.subject.clone())
    }

    /// Body of a commit.
    fn body_of(&self, id: Oid) -> Result<String> {
        Ok(self.commit(id)?.body.clone())
    }

    /// Author signature of a commit.
    fn author_of(&self, id: Oid) -> Result<Author> {
        Ok(self.commit(id)?.author.clone())
    }
}
