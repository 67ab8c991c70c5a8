//! Filtering a changelog down to the lines worth printing.
//!
//! Commits can be restricted to those touching a path prefix. When change
//! identities are enabled, any identity present on both sides is treated as
//! the same change applied to both branches (a cherry-pick) and dropped from
//! both sides.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use treesame_git::{CommitMeta, CommitSource, Oid};

use crate::changelog::{Changelog, Side};
use crate::error::Result;
use crate::identity::{ChangeIdentity, IdentityResolver, IdentityStrategy};
use crate::warning::Warning;

/// How a changelog is filtered.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Only keep commits touching a path starting with this prefix.
    pub prefix: Option<String>,
    /// Identity strategy used to drop cherry-picks; `None` keeps everything.
    pub identity: Option<IdentityStrategy>,
    /// Trailer key read by the trailer strategy.
    pub trailer: String,
}

/// One commit kept in the report.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Side of the shared tree the commit is on.
    pub side: Side,
    /// The commit itself.
    pub commit: Rc<CommitMeta>,
    /// Identity it was matched by; `None` when cherry-pick filtering is off.
    pub identity: Option<ChangeIdentity>,
}

impl Entry {
    /// Render as `[- 1a2b3c4d][M] subject`.
    #[must_use]
    pub fn line(&self, short_len: usize) -> String {
        format!(
            "[{} {}]{} {}",
            self.side.marker(),
            self.commit.short_id(short_len),
            if self.commit.is_merge() { "[M]" } else { "" },
            self.commit.subject
        )
    }
}

/// A filtered changelog.
#[derive(Debug, Clone)]
pub struct Report {
    /// The shared tree both sides were measured from.
    pub tree: Oid,
    /// Kept commits, from-side first.
    pub entries: Vec<Entry>,
    /// Commits dropped because the same change is on both sides.
    pub suppressed: usize,
    /// Commits dropped by the path prefix.
    pub outside_prefix: usize,
    /// Anomalies found along the way.
    pub warnings: Vec<Warning>,
}

impl Report {
    /// Filter a changelog.
    ///
    /// # Errors
    /// Returns error if commit metadata or changed paths cannot be read.
    pub fn build<S: CommitSource + ?Sized>(
        source: &S,
        changelog: &Changelog,
        options: &ReportOptions,
    ) -> Result<Self> {
        let mut candidates: Vec<(Side, Oid)> = Vec::new();
        let mut outside_prefix = 0;
        for (side, id) in changelog.commits() {
            let keep = match &options.prefix {
                Some(prefix) => touches_prefix(source, id, prefix)?,
                None => true,
            };
            if keep {
                candidates.push((side, id));
            } else {
                outside_prefix += 1;
            }
        }

        let mut warnings = Vec::new();
        let mut entries = Vec::with_capacity(candidates.len());
        let resolver = options
            .identity
            .map(|strategy| IdentityResolver::new(source, strategy, options.trailer.as_str()));
        for (side, id) in candidates {
            let identity = match &resolver {
                Some(resolver) => {
                    let resolution = resolver.identity_of(id)?;
                    warnings.extend(resolution.warning);
                    Some(resolution.identity)
                }
                None => None,
            };
            entries.push(Entry {
                side,
                commit: source.commit(id)?,
                identity,
            });
        }

        let shared = shared_identities(&entries, &mut warnings);
        let before = entries.len();
        entries.retain(|e| e.identity.as_ref().is_none_or(|id| !shared.contains(id)));

        Ok(Self {
            tree: changelog.tree,
            suppressed: before - entries.len(),
            outside_prefix,
            entries,
            warnings,
        })
    }

    /// Printable lines, from-side first.
    pub fn lines(&self, short_len: usize) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(move |e| e.line(short_len))
    }
}

fn touches_prefix<S: CommitSource + ?Sized>(source: &S, id: Oid, prefix: &str) -> Result<bool> {
    Ok(source
        .changed_paths(id)?
        .iter()
        .any(|path| path.starts_with(prefix)))
}

/// Identities present on both sides. Identities seen more than once on a
/// single side are reported as warnings, from-side first.
fn shared_identities(entries: &[Entry], warnings: &mut Vec<Warning>) -> HashSet<ChangeIdentity> {
    let mut per_side: [Vec<(&ChangeIdentity, usize)>; 2] = [Vec::new(), Vec::new()];
    let mut index: [HashMap<&ChangeIdentity, usize>; 2] = [HashMap::new(), HashMap::new()];

    for entry in entries {
        let Some(identity) = &entry.identity else {
            continue;
        };
        let side = usize::from(entry.side == Side::To);
        match index[side].get(identity) {
            Some(&slot) => per_side[side][slot].1 += 1,
            None => {
                index[side].insert(identity, per_side[side].len());
                per_side[side].push((identity, 1));
            }
        }
    }

    for (side, counts) in [Side::From, Side::To].into_iter().zip(&per_side) {
        for &(identity, count) in counts {
            if count > 1 {
                warnings.push(Warning::DuplicateIdentity {
                    identity: identity.clone(),
                    side,
                    count,
                });
            }
        }
    }

    index[0]
        .keys()
        .filter(|id| index[1].contains_key(*id))
        .map(|id| (*id).clone())
        .collect()
}
