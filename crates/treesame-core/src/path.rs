//! Shortest commit paths down to a target tree.
//!
//! The path from a commit is empty when the commit already has the target
//! tree. Otherwise it is the commit followed by the shortest path of any of
//! its parents; on equal length the parent declared first wins. Results are
//! memoized per commit, and the walk uses an explicit stack so long linear
//! histories do not exhaust the call stack.

use std::collections::HashMap;
use std::rc::Rc;

use treesame_git::{CommitMeta, CommitSource, Oid};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The commit has the target tree; its path is empty.
    Boundary,
    /// The path continues through `parent` and has `len` commits.
    Via { parent: Oid, len: usize },
    /// No ancestor has the target tree.
    Unreachable,
}

impl Step {
    const fn len(self) -> Option<usize> {
        match self {
            Self::Boundary => Some(0),
            Self::Via { len, .. } => Some(len),
            Self::Unreachable => None,
        }
    }
}

enum Frame {
    Visit(Oid),
    Finish(Rc<CommitMeta>),
}

/// Memoized shortest-path search towards one target tree.
pub struct ShortestPaths<'a, S: CommitSource + ?Sized> {
    source: &'a S,
    target: Oid,
    memo: HashMap<Oid, Step>,
}

impl<'a, S: CommitSource + ?Sized> ShortestPaths<'a, S> {
    /// Create a search for paths ending at `target`.
    pub fn new(source: &'a S, target: Oid) -> Self {
        Self {
            source,
            target,
            memo: HashMap::new(),
        }
    }

    /// The tree paths end at.
    #[must_use]
    pub const fn target(&self) -> Oid {
        self.target
    }

    /// Shortest path from `start` down to, but excluding, the first commit
    /// with the target tree.
    ///
    /// Returns `Ok(None)` when no ancestor of `start` has the target tree.
    ///
    /// # Errors
    /// Returns error if a commit cannot be read.
    pub fn path_from(&mut self, start: Oid) -> Result<Option<Vec<Oid>>> {
        self.solve(start)?;

        let mut path = Vec::new();
        let mut current = start;
        loop {
            match self.memo.get(&current).copied() {
                Some(Step::Boundary) => return Ok(Some(path)),
                Some(Step::Via { parent, .. }) => {
                    path.push(current);
                    current = parent;
                }
                Some(Step::Unreachable) | None => return Ok(None),
            }
        }
    }

    fn solve(&mut self, start: Oid) -> Result<()> {
        let mut stack = vec![Frame::Visit(start)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit(id) => {
                    if self.memo.contains_key(&id) {
                        continue;
                    }
                    let meta = self.source.commit(id)?;
                    if meta.tree == self.target {
                        self.memo.insert(id, Step::Boundary);
                        continue;
                    }
                    let pending: Vec<Oid> = meta
                        .parents
                        .iter()
                        .copied()
                        .filter(|p| !self.memo.contains_key(p))
                        .collect();
                    stack.push(Frame::Finish(meta));
                    stack.extend(pending.into_iter().map(Frame::Visit));
                }
                Frame::Finish(meta) => {
                    let step = self.best_step(&meta);
                    self.memo.insert(meta.id, step);
                }
            }
        }

        Ok(())
    }

    fn best_step(&self, meta: &CommitMeta) -> Step {
        let mut best: Option<(Oid, usize)> = None;
        for &parent in &meta.parents {
            let Some(len) = self.memo.get(&parent).and_then(|s| s.len()) else {
                continue;
            };
            if best.is_none_or(|(_, shortest)| len < shortest) {
                best = Some((parent, len));
            }
        }
        best.map_or(Step::Unreachable, |(parent, len)| Step::Via {
            parent,
            len: len + 1,
        })
    }
}

/// Shortest path from `start` to the target tree.
///
/// Convenience wrapper for a single query; reuse a [`ShortestPaths`] when
/// several starts share one target.
///
/// # Errors
/// Returns error if a commit cannot be read.
pub fn shortest_path<S: CommitSource + ?Sized>(
    source: &S,
    start: Oid,
    target: Oid,
) -> Result<Option<Vec<Oid>>> {
    ShortestPaths::new(source, target).path_from(start)
}
