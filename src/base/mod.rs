//! Foundation types for the BBj engine.
//!
//! - [`DocumentId`] - Workspace document identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other modules of the crate.

mod document_id;
mod span;

pub use document_id::DocumentId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
