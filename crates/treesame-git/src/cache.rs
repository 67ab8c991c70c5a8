//! Per-invocation memo tables for backend reads.
//!
//! Commit objects are immutable, so once read a commit never needs to be
//! read again. The cache has no eviction and lives as long as the
//! [`Repository`](crate::Repository) that owns it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use git2::Oid;

use crate::commit::CommitMeta;

/// Memoized results of ref resolution, commit reads and changed-path queries.
#[derive(Debug, Default)]
pub struct CommitCache {
    refs: RefCell<HashMap<String, Oid>>,
    commits: RefCell<HashMap<Oid, Rc<CommitMeta>>>,
    changed: RefCell<HashMap<Oid, Rc<[String]>>>,
    misses: Cell<usize>,
}

impl CommitCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached ref resolution, or run `load` and remember its result.
    ///
    /// # Errors
    /// Propagates the error from `load`; failures are not cached.
    pub fn resolve_with<E>(
        &self,
        spec: &str,
        load: impl FnOnce() -> Result<Oid, E>,
    ) -> Result<Oid, E> {
        if let Some(oid) = self.refs.borrow().get(spec) {
            return Ok(*oid);
        }
        self.misses.set(self.misses.get() + 1);
        let oid = load()?;
        self.refs.borrow_mut().insert(spec.to_owned(), oid);
        Ok(oid)
    }

    /// Return the cached commit, or run `load` and remember its result.
    ///
    /// # Errors
    /// Propagates the error from `load`; failures are not cached.
    pub fn commit_with<E>(
        &self,
        id: Oid,
        load: impl FnOnce() -> Result<CommitMeta, E>,
    ) -> Result<Rc<CommitMeta>, E> {
        if let Some(meta) = self.commits.borrow().get(&id) {
            return Ok(Rc::clone(meta));
        }
        self.misses.set(self.misses.get() + 1);
        let meta = Rc::new(load()?);
        self.commits.borrow_mut().insert(id, Rc::clone(&meta));
        Ok(meta)
    }

    /// Return the cached changed paths, or run `load` and remember its result.
    ///
    /// # Errors
    /// Propagates the error from `load`; failures are not cached.
    pub fn changed_with<E>(
        &self,
        id: Oid,
        load: impl FnOnce() -> Result<Vec<String>, E>,
    ) -> Result<Rc<[String]>, E> {
        if let Some(paths) = self.changed.borrow().get(&id) {
            return Ok(Rc::clone(paths));
        }
        self.misses.set(self.misses.get() + 1);
        let paths: Rc<[String]> = load()?.into();
        self.changed.borrow_mut().insert(id, Rc::clone(&paths));
        Ok(paths)
    }

    /// Number of distinct commits read so far.
    #[must_use]
    pub fn commits_loaded(&self) -> usize {
        self.commits.borrow().len()
    }

    /// Number of times a loader had to run.
    #[must_use]
    pub fn backend_reads(&self) -> usize {
        self.misses.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Author;

    fn meta(id: Oid) -> CommitMeta {
        CommitMeta {
            id,
            tree: Oid::zero(),
            parents: vec![],
            subject: String::new(),
            body: String::new(),
            author: Author {
                name: String::new(),
                email: String::new(),
                time: 0,
            },
        }
    }

    #[test]
    fn test_commit_loaded_once() {
        let cache = CommitCache::new();
        let id = Oid::from_str("1111111111111111111111111111111111111111").unwrap();

        let first = cache
            .commit_with(id, || Ok::<_, ()>(meta(id)))
            .unwrap();
        let second = cache
            .commit_with(id, || -> Result<CommitMeta, ()> {
                panic!("loader must not run twice")
            })
            .unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.commits_loaded(), 1);
        assert_eq!(cache.backend_reads(), 1);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache = CommitCache::new();

        let err = cache.resolve_with("main", || Err::<Oid, _>("boom"));
        assert_eq!(err, Err("boom"));

        let oid = cache.resolve_with("main", || Ok::<_, ()>(Oid::zero())).unwrap();
        assert_eq!(oid, Oid::zero());
        assert_eq!(cache.backend_reads(), 2);
    }

    #[test]
    fn test_changed_paths_cached() {
        let cache = CommitCache::new();
        let id = Oid::zero();

        let paths = cache
            .changed_with(id, || Ok::<_, ()>(vec!["lib/a.rs".to_owned()]))
            .unwrap();
        let again = cache
            .changed_with(id, || Ok::<_, ()>(Vec::new()))
            .unwrap();

        assert_eq!(&*paths, &["lib/a.rs".to_owned()]);
        assert!(Rc::ptr_eq(&paths, &again));
    }
}
