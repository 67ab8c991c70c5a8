//! # treesame-git
//!
//! Read-only commit graph access for treesame, built on git2-rs.
//! Exposes the [`CommitSource`] trait consumed by the changelog
//! algorithms and a cached [`Repository`] implementing it.

mod cache;
mod commit;
mod error;
mod repository;
mod traits;

pub use cache::CommitCache;
pub use commit::{Author, CommitMeta, short_oid};
pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::Repository;
pub use traits::CommitSource;
