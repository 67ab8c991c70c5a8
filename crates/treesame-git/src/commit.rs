//! Commit metadata as seen by the changelog algorithms.

use git2::Oid;

/// Author signature of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
    /// Author timestamp, seconds since the Unix epoch.
    pub time: i64,
}

/// Everything the changelog needs to know about a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    /// Commit id.
    pub id: Oid,
    /// Id of the tree the commit points at.
    pub tree: Oid,
    /// Parent ids in the order recorded in the commit object.
    pub parents: Vec<Oid>,
    /// Subject line (first paragraph, joined into one line).
    pub subject: String,
    /// Message body after the subject paragraph.
    pub body: String,
    /// Author signature.
    pub author: Author,
}

impl CommitMeta {
    /// Whether the commit has more than one parent.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Whether the commit has no parents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Abbreviated commit id of at most `len` hex digits.
    #[must_use]
    pub fn short_id(&self, len: usize) -> String {
        short_oid(self.id, len)
    }
}

/// Abbreviate an object id to at most `len` hex digits.
#[must_use]
pub fn short_oid(oid: Oid, len: usize) -> String {
    let full = oid.to_string();
    full.get(..len).unwrap_or(&full).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(parents: usize) -> CommitMeta {
        CommitMeta {
            id: Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap(),
            tree: Oid::zero(),
            parents: vec![Oid::zero(); parents],
            subject: "Subject".into(),
            body: String::new(),
            author: Author {
                name: "A".into(),
                email: "a@example.com".into(),
                time: 0,
            },
        }
    }

    #[test]
    fn test_merge_and_root_flags() {
        assert!(meta(0).is_root());
        assert!(!meta(0).is_merge());
        assert!(!meta(1).is_merge());
        assert!(meta(2).is_merge());
        assert!(meta(3).is_merge());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(meta(1).short_id(8), "01234567");
        assert_eq!(meta(1).short_id(100).len(), 40);
    }
}
