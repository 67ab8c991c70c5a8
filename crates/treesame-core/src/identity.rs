//! Change identities: recognizing the same logical change on two branches.
//!
//! Cherry-picks and rebases give a change a new commit id and often a new
//! tree, so commits are matched by a derived identity instead. The identity
//! is either an explicit trailer (`Change-Id: I…`) or a SHA-256 digest over
//! the commit's body, author and subject, which cherry-picks preserve.

use std::fmt;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use treesame_git::{CommitMeta, CommitSource, Oid};

use crate::error::Result;
use crate::warning::Warning;

/// Primary strategy used to derive change identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStrategy {
    /// Digest of commit metadata.
    #[default]
    Metahash,
    /// Explicit trailer in the commit body, falling back to the digest.
    Trailer,
}

/// Identity of a logical change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeIdentity {
    /// Value of an explicit trailer.
    Explicit(String),
    /// Hex SHA-256 of commit metadata.
    Hashed(String),
}

impl ChangeIdentity {
    /// The identity value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Explicit(v) | Self::Hashed(v) => v,
        }
    }

    /// Whether the identity came from a trailer.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

impl fmt::Display for ChangeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one commit plus any anomaly found while deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Identity used to match the commit.
    pub identity: ChangeIdentity,
    /// Set when the trailer was missing or ambiguous and the digest was used.
    pub warning: Option<Warning>,
}

/// Derives change identities for commits read from a [`CommitSource`].
pub struct IdentityResolver<'a, S: CommitSource + ?Sized> {
    source: &'a S,
    strategy: IdentityStrategy,
    trailer: String,
}

impl<'a, S: CommitSource + ?Sized> IdentityResolver<'a, S> {
    /// Create a resolver reading `trailer` lines when the strategy asks for it.
    pub fn new(source: &'a S, strategy: IdentityStrategy, trailer: impl Into<String>) -> Self {
        Self {
            source,
            strategy,
            trailer: trailer.into(),
        }
    }

    /// Derive the identity of a commit.
    ///
    /// # Errors
    /// Returns error if the commit cannot be read.
    pub fn identity_of(&self, id: Oid) -> Result<Resolution> {
        let meta = self.source.commit(id)?;
        Ok(match self.strategy {
            IdentityStrategy::Metahash => Resolution {
                identity: ChangeIdentity::Hashed(metahash(&meta)),
                warning: None,
            },
            IdentityStrategy::Trailer => self.from_trailer(&meta),
        })
    }

    fn from_trailer(&self, meta: &CommitMeta) -> Resolution {
        let values = trailer_values(&meta.body, &self.trailer);
        match values.as_slice() {
            [value] => Resolution {
                identity: ChangeIdentity::Explicit((*value).to_owned()),
                warning: None,
            },
            [] => Resolution {
                identity: ChangeIdentity::Hashed(metahash(meta)),
                warning: Some(Warning::MissingIdentity {
                    commit: meta.id,
                    trailer: self.trailer.clone(),
                }),
            },
            _ => Resolution {
                identity: ChangeIdentity::Hashed(metahash(meta)),
                warning: Some(Warning::AmbiguousIdentity {
                    commit: meta.id,
                    values: values.iter().map(|v| (*v).to_owned()).collect(),
                }),
            },
        }
    }
}

/// Distinct values of `key` trailers in a commit body, in order of appearance.
///
/// A trailer is a line of the form `<key>: <value>` once surrounding
/// whitespace is removed. Lines with an empty value are ignored.
#[must_use]
pub fn trailer_values<'b>(body: &'b str, key: &str) -> Vec<&'b str> {
    let mut values: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(value) = line
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
        else {
            continue;
        };
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// SHA-256 over `body:author name:author email:author time:subject`, hex encoded.
#[must_use]
pub fn metahash(meta: &CommitMeta) -> String {
    let mut hasher = Sha256::new();
    hasher.update(meta.body.as_bytes());
    hasher.update(b":");
    hasher.update(meta.author.name.as_bytes());
    hasher.update(b":");
    hasher.update(meta.author.email.as_bytes());
    hasher.update(b":");
    hasher.update(meta.author.time.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(meta.subject.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryGraph;

    #[test]
    fn test_trailer_values() {
        let body = "Fix the thing.\n\n  Change-Id: I111  \nSigned-off-by: x\n";
        assert_eq!(trailer_values(body, "Change-Id"), vec!["I111"]);
        assert!(trailer_values("no trailers here", "Change-Id").is_empty());
        assert!(trailer_values("Change-Id:   \n", "Change-Id").is_empty());
        assert!(trailer_values("Change-Idx: I1\n", "Change-Id").is_empty());
    }

    #[test]
    fn test_trailer_values_deduplicates() {
        let body = "Change-Id: I1\nChange-Id: I2\nChange-Id: I1\n";
        assert_eq!(trailer_values(body, "Change-Id"), vec!["I1", "I2"]);
    }

    #[test]
    fn test_metahash_is_pure() {
        let mut graph = MemoryGraph::new();
        let a = graph.add("a", "t1", &[]);
        let meta = graph.commit(a).unwrap();

        let first = metahash(&meta);
        assert_eq!(first, metahash(&meta));
        assert_eq!(first.len(), 64);

        let mut other = (*meta).clone();
        other.author.time += 1;
        assert_ne!(first, metahash(&other));
    }

    #[test]
    fn test_metahash_strategy_never_warns() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Change-Id: I1\nChange-Id: I2\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Metahash, "Change-Id");
        let res = resolver.identity_of(a).unwrap();
        assert!(!res.identity.is_explicit());
        assert_eq!(res.warning, None);
    }

    #[test]
    fn test_single_trailer_is_explicit() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Body\n\nChange-Id: Iabc\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Trailer, "Change-Id");
        let res = resolver.identity_of(a).unwrap();
        assert_eq!(res.identity, ChangeIdentity::Explicit("Iabc".into()));
        assert_eq!(res.warning, None);
    }

    #[test]
    fn test_repeated_identical_trailer_is_not_ambiguous() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Change-Id: Iabc\nChange-Id: Iabc\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Trailer, "Change-Id");
        let res = resolver.identity_of(a).unwrap();
        assert_eq!(res.identity, ChangeIdentity::Explicit("Iabc".into()));
    }

    #[test]
    fn test_conflicting_trailers_fall_back_to_hash() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Change-Id: I1\nChange-Id: I2\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Trailer, "Change-Id");
        let res = resolver.identity_of(a).unwrap();
        let meta = graph.commit(a).unwrap();

        assert_eq!(res.identity, ChangeIdentity::Hashed(metahash(&meta)));
        assert_ne!(res.identity.as_str(), "I1");
        assert_ne!(res.identity.as_str(), "I2");
        assert_eq!(
            res.warning,
            Some(Warning::AmbiguousIdentity {
                commit: a,
                values: vec!["I1".into(), "I2".into()],
            })
        );
    }

    #[test]
    fn test_missing_trailer_falls_back_to_hash() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Just a body\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Trailer, "Change-Id");
        let res = resolver.identity_of(a).unwrap();

        assert!(!res.identity.is_explicit());
        assert!(matches!(res.warning, Some(Warning::MissingIdentity { commit, .. }) if commit == a));
    }

    #[test]
    fn test_custom_trailer_key() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_with_body("a", "t1", &[], "Change-Id: I1\nLink-Id: L9\n");

        let resolver = IdentityResolver::new(&graph, IdentityStrategy::Trailer, "Link-Id");
        let res = resolver.identity_of(a).unwrap();
        assert_eq!(res.identity, ChangeIdentity::Explicit("L9".into()));
    }
}
