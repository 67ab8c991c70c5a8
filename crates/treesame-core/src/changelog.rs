//! Changelog between two refs, relative to their nearest shared tree.

use std::fmt;

use treesame_git::{CommitSource, Oid};

use crate::error::{Error, Result};
use crate::path::ShortestPaths;
use crate::ring::find_equivalent_tree;

/// Which side of the changelog a commit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Removed going away from the source ref.
    From,
    /// Added going to the destination ref.
    To,
}

impl Side {
    /// Marker printed in front of the commit id.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::From => '-',
            Self::To => '+',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Commits separating two refs from the tree state they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// The shared tree both paths lead to.
    pub tree: Oid,
    /// From-side commits, newest first, down towards the shared tree.
    pub from: Vec<Oid>,
    /// To-side commits, oldest first, up from the shared tree.
    pub to: Vec<Oid>,
    /// Commits expanded while searching for the shared tree.
    pub expanded: usize,
}

impl Changelog {
    /// Resolve two refs and compute the changelog between them.
    ///
    /// # Errors
    /// Returns `RefNotFound` (wrapped) if a ref does not resolve,
    /// `DisjointHistory` if the histories share no tree, or `NoPath`
    /// if a path to the shared tree cannot be rebuilt.
    pub fn between<S: CommitSource + ?Sized>(
        source: &S,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<Self> {
        let from = source.resolve(from_ref)?;
        let to = source.resolve(to_ref)?;

        Self::compute(source, from, to).map_err(|e| match e {
            Error::DisjointHistory { .. } => Error::DisjointHistory {
                from: from_ref.to_owned(),
                to: to_ref.to_owned(),
            },
            other => other,
        })
    }

    /// Compute the changelog between two commits.
    ///
    /// # Errors
    /// Returns `DisjointHistory` if the histories share no tree, or `NoPath`
    /// if a path to the shared tree cannot be rebuilt.
    pub fn compute<S: CommitSource + ?Sized>(source: &S, from: Oid, to: Oid) -> Result<Self> {
        let Some(eq) = find_equivalent_tree(source, &[from, to])? else {
            return Err(Error::DisjointHistory {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        let mut paths = ShortestPaths::new(source, eq.tree);
        let from_path = paths.path_from(from)?.ok_or(Error::NoPath {
            start: from,
            tree: eq.tree,
        })?;
        let mut to_path = paths.path_from(to)?.ok_or(Error::NoPath {
            start: to,
            tree: eq.tree,
        })?;
        to_path.reverse();

        Ok(Self {
            tree: eq.tree,
            from: from_path,
            to: to_path,
            expanded: eq.expanded,
        })
    }

    /// Whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }

    /// All commits tagged with their side, from-side first.
    pub fn commits(&self) -> impl Iterator<Item = (Side, Oid)> + '_ {
        self.from
            .iter()
            .map(|&id| (Side::From, id))
            .chain(self.to.iter().map(|&id| (Side::To, id)))
    }
}
