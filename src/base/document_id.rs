//! Document identifiers.

use std::fmt;

/// Identifies a source document inside one workspace.
///
/// Ids are handed out by the document builder in registration order and are
/// never reused while the builder lives. Ordering by id is the deterministic
/// ordering used for workspace lookups and dependent rebuilds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocumentId(u32);

impl DocumentId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

impl From<u32> for DocumentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
