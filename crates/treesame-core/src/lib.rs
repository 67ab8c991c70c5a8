//! # treesame-core
//!
//! Core library for treesame: a changelog between two refs measured from the
//! nearest tree state both histories passed through, with cherry-picked
//! changes recognized by change identity and removed from both sides.

pub mod changelog;
pub mod config;
pub mod error;
pub mod identity;
pub mod path;
pub mod report;
pub mod ring;
pub mod warning;

#[cfg(test)]
mod testing;

pub use changelog::{Changelog, Side};
pub use config::Config;
pub use error::{Error, Result};
pub use identity::{ChangeIdentity, IdentityResolver, IdentityStrategy};
pub use path::{ShortestPaths, shortest_path};
pub use report::{Entry, Report, ReportOptions};
pub use ring::{Equivalence, find_equivalent_tree};
pub use warning::Warning;
