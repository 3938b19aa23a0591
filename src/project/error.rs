//! Errors surfaced by the document builder.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::DocumentId;

/// Why a document could not be (fully) built. Never fatal to the engine:
/// failures are collected into a [`BuildReport`](super::BuildReport).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unknown document {0}")]
    UnknownDocument(DocumentId),

    /// The document has syntax errors; its previous exports stay in the
    /// index, marked invalid.
    #[error("{uri}: {errors} syntax error(s)")]
    ParseFailure {
        document: DocumentId,
        uri: SmolStr,
        errors: usize,
    },

    #[error("build of {0} was cancelled")]
    Cancelled(DocumentId),
}

impl BuildError {
    pub fn document(&self) -> DocumentId {
        match self {
            BuildError::UnknownDocument(document)
            | BuildError::ParseFailure { document, .. }
            | BuildError::Cancelled(document) => *document,
        }
    }
}
