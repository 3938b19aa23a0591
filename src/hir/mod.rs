//! Semantic model: scopes, the workspace index, linking and validation.
//!
//! ## Pipeline (per document)
//!
//! ```text
//! parse_document(text)          <- salsa-memoized parse
//!     |
//!     v
//! compute_scopes(syntax)        -> ExportSet + ScopeTree + ReferenceSites
//!     |
//!     v
//! WorkspaceIndex::upsert        <- exports replace the previous set
//!     |
//!     v
//! Linker::link(references)      <- ScopeProviderStrategy + JavaInteropResolver
//!     |
//!     v
//! ValidatorRuleSet::validate    -> Diagnostics
//! ```
//!
//! Documents only see each other through the [`WorkspaceIndex`]; the
//! [`ReferenceGraph`] records who looked at what so the builder knows which
//! documents to relink after a change.

mod db;
mod diagnostics;
mod graph;
mod index;
mod interop;
mod linker;
mod names;
mod scope;
mod scope_provider;
mod symbols;
pub mod validation;

pub use db::{DocumentText, ParseResult, RootDatabase, parse_document};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, RelatedInfo, Severity, codes, sort_diagnostics,
};
pub use graph::ReferenceGraph;
pub use index::WorkspaceIndex;
pub use interop::{ClassCatalog, InteropResolution, JavaClass, JavaInteropResolver, StaticCatalog};
pub use linker::{LinkResult, Linker};
pub use names::{BbjNameProvider, NameProvider, is_java_qualified_name};
pub use scope::{
    DocumentScopes, ReferenceKind, ReferenceSite, Scope, ScopeId, ScopeKind, ScopeTree, SymbolId,
    compute_scopes, is_builtin_type, is_procedure_name,
};
pub use scope_provider::{
    CandidateSource, Candidates, DefaultScopeProvider, ScopeContext, ScopeProviderStrategy,
};
pub use symbols::{ExportSet, Symbol, SymbolKind, SymbolOrigin, Visibility};
pub use validation::{ValidationContext, ValidationRule, ValidatorRuleSet};
