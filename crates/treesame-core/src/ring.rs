//! Equivalence-ring search: the nearest tree state shared by several refs.
//!
//! Merge-base search matches commits by id, which fails once a history has
//! been rebased or cherry-picked across. This search matches on tree ids
//! instead: two commits with unrelated ancestry share a tree id whenever
//! they snapshot identical content.
//!
//! ## Expansion order
//!
//! Each ref gets a frontier holding the trees it has seen and a FIFO of
//! commits still to expand. Frontiers take turns in input order, each
//! expanding exactly one queued commit per turn. A frontier whose queue runs
//! dry leaves the rotation, but the trees it saw still count. Queues are not
//! deduplicated, so a commit reached through two merge paths is expanded
//! twice; this keeps the rotation, and therefore which tree is found first
//! when several qualify, independent of traversal bookkeeping.

use std::collections::{HashSet, VecDeque};

use treesame_git::{CommitSource, Oid};

use crate::error::Result;

/// Outcome of a successful equivalence search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equivalence {
    /// Tree reachable from every searched ref.
    pub tree: Oid,
    /// Number of commits expanded before the tree was found.
    pub expanded: usize,
}

#[derive(Debug)]
struct Frontier {
    seen: HashSet<Oid>,
    queue: VecDeque<Oid>,
}

/// Find a tree id reachable by parent-following from every commit in `starts`.
///
/// Returns `Ok(None)` when the histories never pass through a common tree,
/// or when `starts` is empty.
///
/// # Errors
/// Returns error if a commit cannot be read.
pub fn find_equivalent_tree<S: CommitSource + ?Sized>(
    source: &S,
    starts: &[Oid],
) -> Result<Option<Equivalence>> {
    let mut frontiers: Vec<Frontier> = starts
        .iter()
        .map(|&start| Frontier {
            seen: HashSet::new(),
            queue: VecDeque::from([start]),
        })
        .collect();
    let mut rotation: VecDeque<usize> = (0..frontiers.len()).collect();
    let mut expanded = 0;

    while let Some(slot) = rotation.pop_front() {
        let Some(commit) = frontiers[slot].queue.pop_front() else {
            continue;
        };
        let meta = source.commit(commit)?;
        expanded += 1;

        frontiers[slot].seen.insert(meta.tree);
        if frontiers.iter().all(|f| f.seen.contains(&meta.tree)) {
            return Ok(Some(Equivalence {
                tree: meta.tree,
                expanded,
            }));
        }

        let frontier = &mut frontiers[slot];
        frontier.queue.extend(meta.parents.iter().copied());
        if !frontier.queue.is_empty() {
            rotation.push_back(slot);
        }
    }

    Ok(None)
}
