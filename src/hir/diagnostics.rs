//! Diagnostics: semantic error reporting.
//!
//! Every diagnostic is attached to an AST node of one document, optionally
//! narrowed to a named property of that node (`options` of an `OPEN`
//! statement, for example), so editor integrations can highlight the exact
//! part of the statement that is wrong.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextRange;

use super::symbols::Symbol;
use crate::base::DocumentId;
use crate::parser::{NodeId, SyntaxError};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message attached to an AST node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// The document containing this diagnostic.
    pub document: DocumentId,
    /// The offending node.
    pub node: NodeId,
    /// Property of the node the diagnostic is about, if narrower than the node.
    pub property: Option<&'static str>,
    pub range: TextRange,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<&'static str>,
    pub message: Arc<str>,
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RelatedInfo {
    pub document: DocumentId,
    pub range: TextRange,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(
        document: DocumentId,
        node: NodeId,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            document,
            node,
            property: None,
            range,
            severity: Severity::Error,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        document: DocumentId,
        node: NodeId,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(document, node, range, message)
        }
    }

    /// Narrow the diagnostic to a property of its node.
    pub fn with_property(mut self, property: &'static str) -> Self {
        self.property = Some(property);
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Semantic errors (linking, statement rules)
/// - **E0100-E0199**: Syntax errors
pub mod codes {
    /// Reference with no candidate.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// Reference with several candidates from different documents.
    pub const AMBIGUOUS_REFERENCE: &str = "E0002";
    /// Java class or member missing from the interop catalog.
    pub const INTEROP_NOT_FOUND: &str = "E0003";
    /// Statement options outside the verb's legal set.
    pub const OPTION_VIOLATION: &str = "E0004";
    /// Option that exists but is not allowed on this verb.
    pub const INVALID_OPTION_FOR_VERB: &str = "E0005";
    /// Jump to a label that is not declared in the document.
    pub const UNDEFINED_LABEL: &str = "E0006";
    /// Label declared twice in one scope.
    pub const DUPLICATE_LABEL: &str = "E0007";

    /// Syntax error reported by the parser.
    pub const SYNTAX_ERROR: &str = "E0100";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics for one document.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    document: DocumentId,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new(document: DocumentId) -> Self {
        Self {
            document,
            diagnostics: Vec::new(),
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an error on `node` and return it for further decoration.
    pub fn error(
        &mut self,
        node: NodeId,
        range: TextRange,
        code: &'static str,
        message: impl Into<Arc<str>>,
    ) -> &mut Diagnostic {
        self.diagnostics
            .push(Diagnostic::error(self.document, node, range, message).with_code(code));
        let last = self.diagnostics.len() - 1;
        &mut self.diagnostics[last]
    }

    /// Add an unresolved reference error.
    pub fn unresolved_reference(&mut self, node: NodeId, range: TextRange, kind: &str, name: &str) {
        self.error(
            node,
            range,
            codes::UNRESOLVED_REFERENCE,
            format!("Could not resolve reference to {kind} named '{name}'."),
        );
    }

    /// Add an ambiguous reference error listing every candidate.
    pub fn ambiguous_reference(
        &mut self,
        node: NodeId,
        range: TextRange,
        name: &str,
        candidates: &[Symbol],
        uri_of: impl Fn(DocumentId) -> Option<SmolStr>,
    ) {
        let documents: Vec<String> = candidates
            .iter()
            .filter_map(|c| c.document())
            .map(|doc| {
                uri_of(doc)
                    .map(|uri| uri.to_string())
                    .unwrap_or_else(|| doc.to_string())
            })
            .collect();
        let diagnostic = self.error(
            node,
            range,
            codes::AMBIGUOUS_REFERENCE,
            format!(
                "Ambiguous reference '{name}': declared in {}.",
                documents.join(", ")
            ),
        );
        for candidate in candidates {
            if let Some(document) = candidate.document() {
                diagnostic.related.push(RelatedInfo {
                    document,
                    range: candidate.range,
                    message: Arc::from(format!(
                        "candidate {} '{}'",
                        candidate.kind.display(),
                        candidate.name
                    )),
                });
            }
        }
    }

    /// Add an error for a Java name missing from the interop catalog.
    pub fn interop_not_found(&mut self, node: NodeId, range: TextRange, qualified_name: &str) {
        self.error(
            node,
            range,
            codes::INTEROP_NOT_FOUND,
            format!("Could not resolve Java class '{qualified_name}'."),
        );
    }

    /// Convert parser errors into diagnostics on the program node.
    pub fn syntax_errors(&mut self, errors: &[SyntaxError]) {
        for error in errors {
            self.error(
                NodeId::ROOT,
                error.range,
                codes::SYNTAX_ERROR,
                error.message.as_str(),
            );
        }
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Sorted, deduplicated diagnostics.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        sort_diagnostics(&mut self.diagnostics);
        self.diagnostics.dedup();
        self.diagnostics
    }
}

/// Orders diagnostics by position, then code, then message.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.range
            .start()
            .cmp(&b.range.start())
            .then_with(|| a.range.end().cmp(&b.range.end()))
            .then_with(|| a.code.cmp(&b.code))
            .then_with(|| a.message.cmp(&b.message))
            .then_with(|| a.node.cmp(&b.node))
    });
}
