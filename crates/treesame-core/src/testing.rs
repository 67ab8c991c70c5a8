//! In-memory commit graph for testing the changelog algorithms.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use sha2::{Digest, Sha256};
use treesame_git::{Author, CommitMeta, CommitSource, Error, Oid, Result};

/// A commit graph held in memory.
///
/// Commits and trees are named by short strings; their ids are derived from
/// a digest of those names, so they are stable across runs.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    commits: HashMap<Oid, Rc<CommitMeta>>,
    refs: HashMap<String, Oid>,
    changed: HashMap<Oid, Rc<[String]>>,
    reads: Cell<usize>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit id for a commit name.
    pub fn oid(name: &str) -> Oid {
        named_oid("commit", name)
    }

    /// Tree id for a tree name.
    pub fn tree(name: &str) -> Oid {
        named_oid("tree", name)
    }

    /// Add a commit whose subject is its name, and a ref of the same name.
    pub fn add(&mut self, name: &str, tree: &str, parents: &[Oid]) -> Oid {
        self.add_with_body(name, tree, parents, "")
    }

    /// Add a commit with an explicit body.
    pub fn add_with_body(&mut self, name: &str, tree: &str, parents: &[Oid], body: &str) -> Oid {
        let id = Self::oid(name);
        self.insert(CommitMeta {
            id,
            tree: Self::tree(tree),
            parents: parents.to_vec(),
            subject: name.to_owned(),
            body: body.to_owned(),
            author: Author {
                name: "Test User".into(),
                email: "test@example.com".into(),
                time: 1_700_000_000,
            },
        });
        self.refs.insert(name.to_owned(), id);
        id
    }

    /// Add a fully specified commit.
    pub fn insert(&mut self, meta: CommitMeta) {
        self.commits.insert(meta.id, Rc::new(meta));
    }

    /// Record the paths a commit touches.
    pub fn set_changed(&mut self, id: Oid, paths: &[&str]) {
        let paths: Vec<String> = paths.iter().map(|p| (*p).to_owned()).collect();
        self.changed.insert(id, paths.into());
    }

    /// Number of `commit` lookups served.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

fn named_oid(kind: &str, name: &str) -> Oid {
    let digest = Sha256::digest(format!("{kind}:{name}").as_bytes());
    Oid::from_bytes(&digest[..20]).unwrap()
}

impl CommitSource for MemoryGraph {
    fn resolve(&self, spec: &str) -> Result<Oid> {
        self.refs
            .get(spec)
            .copied()
            .ok_or_else(|| Error::RefNotFound(spec.into()))
    }

    fn commit(&self, id: Oid) -> Result<Rc<CommitMeta>> {
        self.reads.set(self.reads.get() + 1);
        self.commits
            .get(&id)
            .cloned()
            .ok_or(Error::CommitNotFound(id))
    }

    fn changed_paths(&self, id: Oid) -> Result<Rc<[String]>> {
        Ok(self
            .changed
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Rc::from(Vec::new())))
    }
}
