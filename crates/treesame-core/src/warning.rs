//! Non-fatal anomalies found while building a changelog.

use std::fmt;

use treesame_git::{Oid, short_oid};

use crate::changelog::Side;
use crate::identity::ChangeIdentity;

/// A problem worth reporting that does not stop the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A commit carries several different trailer values.
    AmbiguousIdentity { commit: Oid, values: Vec<String> },

    /// A commit carries no trailer.
    MissingIdentity { commit: Oid, trailer: String },

    /// The same change identity appears more than once on one side.
    DuplicateIdentity {
        identity: ChangeIdentity,
        side: Side,
        count: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousIdentity { commit, values } => write!(
                f,
                "commit {} has {} different change ids ({}), using metahash",
                short_oid(*commit, 8),
                values.len(),
                values.join(", ")
            ),
            Self::MissingIdentity { commit, trailer } => write!(
                f,
                "commit {} has no {trailer} trailer, using metahash",
                short_oid(*commit, 8)
            ),
            Self::DuplicateIdentity {
                identity,
                side,
                count,
            } => write!(
                f,
                "change {identity} applied {count} times on the {side} branch"
            ),
        }
    }
}
