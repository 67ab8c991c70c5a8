//! Repository wrapper providing cached, read-only commit queries.

use std::path::Path;
use std::rc::Rc;

use git2::{DiffOptions, ErrorCode, Oid};

use crate::cache::CommitCache;
use crate::commit::{Author, CommitMeta};
use crate::error::{Error, Result};
use crate::traits::CommitSource;

/// Read-only handle on a git repository.
///
/// Every query goes through a [`CommitCache`] owned by the handle, so one
/// `Repository` corresponds to one changelog invocation.
pub struct Repository {
    inner: git2::Repository,
    cache: CommitCache,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = git2::Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository(path.to_path_buf()),
            _ => Error::Git2(e),
        })?;
        Ok(Self {
            inner,
            cache: CommitCache::new(),
        })
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get the read cache.
    #[must_use]
    pub const fn cache(&self) -> &CommitCache {
        &self.cache
    }

    fn load_commit(&self, id: Oid) -> Result<CommitMeta> {
        let commit = self.inner.find_commit(id).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::CommitNotFound(id),
            _ => Error::Git2(e),
        })?;

        let sig = commit.author();
        let author = Author {
            name: String::from_utf8_lossy(sig.name_bytes()).into_owned(),
            email: String::from_utf8_lossy(sig.email_bytes()).into_owned(),
            time: sig.when().seconds(),
        };

        Ok(CommitMeta {
            id,
            tree: commit.tree_id(),
            parents: commit.parent_ids().collect(),
            subject: lossy(commit.summary_bytes()),
            body: lossy(commit.body_bytes()),
            author,
        })
    }

    fn load_changed_paths(&self, id: Oid) -> Result<Vec<String>> {
        let commit = self.inner.find_commit(id)?;
        let new_tree = commit.tree()?;
        let old_tree = match commit.parent_ids().next() {
            Some(parent) => Some(self.inner.find_commit(parent)?.tree()?),
            None => None,
        };

        let mut opts = DiffOptions::new();
        opts.ignore_submodules(true);
        let diff =
            self.inner
                .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut opts))?;

        let paths = diff
            .deltas()
            .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();

        Ok(paths)
    }
}

/// Decode message bytes the way author fields are decoded, replacing
/// invalid UTF-8 with U+FFFD.
fn lossy(bytes: Option<&[u8]>) -> String {
    bytes.map_or_else(String::new, |b| String::from_utf8_lossy(b).into_owned())
}

impl CommitSource for Repository {
    fn resolve(&self, spec: &str) -> Result<Oid> {
        self.cache.resolve_with(spec, || {
            let object = self
                .inner
                .revparse_single(spec)
                .map_err(|_| Error::RefNotFound(spec.into()))?;
            let commit = object
                .peel_to_commit()
                .map_err(|_| Error::NotACommit(spec.into()))?;
            Ok(commit.id())
        })
    }

    fn commit(&self, id: Oid) -> Result<Rc<CommitMeta>> {
        self.cache.commit_with(id, || self.load_commit(id))
    }

    fn changed_paths(&self, id: Oid) -> Result<Rc<[String]>> {
        self.cache.changed_with(id, || self.load_changed_paths(id))
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .field("commits_loaded", &self.cache.commits_loaded())
            .finish()
    }
}
