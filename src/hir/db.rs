//! Salsa database and the parse query.
//!
//! Only parsing goes through salsa. Scopes, links and diagnostics depend on
//! other documents through the [`WorkspaceIndex`](super::WorkspaceIndex) and
//! are recomputed by the document builder.

use std::sync::Arc;

use crate::base::DocumentId;
use crate::parser::SyntaxError;
use crate::syntax::SyntaxFile;

// ============================================================================
// INPUTS
// ============================================================================

/// Input: the text of a document.
///
/// Set this explicitly when a document is opened or changed.
#[salsa::input]
pub struct DocumentText {
    pub document: DocumentId,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {}
}

impl RootDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Outcome of parsing one document.
///
/// The syntax tree is kept even when the parse reported errors; `success`
/// says whether it is trustworthy enough to recompute exports from.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub success: bool,
    pub errors: Vec<SyntaxError>,
    pub syntax_file: Option<Arc<SyntaxFile>>,
}

// Manual Eq impl for Salsa tracking
impl Eq for ParseResult {}

impl ParseResult {
    pub fn new(syntax_file: SyntaxFile) -> Self {
        Self {
            success: !syntax_file.has_errors(),
            errors: syntax_file.errors().to_vec(),
            syntax_file: Some(Arc::new(syntax_file)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.success
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn syntax_file(&self) -> Option<&Arc<SyntaxFile>> {
        self.syntax_file.as_ref()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parses a document. Memoized until its [`DocumentText`] changes.
#[salsa::tracked]
pub fn parse_document(db: &dyn salsa::Database, input: DocumentText) -> ParseResult {
    let text = input.text(db);
    tracing::trace!(document = %input.document(db), len = text.len(), "parse");
    ParseResult::new(SyntaxFile::new(text))
}
