//! # bbj-base
//!
//! Core library for BBj parsing, scoping, cross-document linking and
//! semantic validation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost facade, go-to-definition, symbol search
//!   ↓
//! project   → DocumentBuilder orchestration, EngineConfig, BuildError
//!   ↓
//! hir       → Scopes, workspace index, Java interop, linker, validator
//!   ↓
//! syntax    → SyntaxFile (AST + line index), traversal helpers
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (DocumentId, TextRange, LineIndex)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use bbj::project::DocumentBuilder;
//!
//! let mut builder = DocumentBuilder::default();
//! let lib = builder.open_document("file:///lib.bbj", "class public Helper\nclassend\n");
//! let main = builder.open_document("file:///main.bbj", "declare Helper h!\n");
//! let report = builder.rebuild(&[lib, main]);
//! assert!(report.is_clean());
//! assert_eq!(builder.diagnostics(main).map(<[_]>::len), Some(0));
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → project → ide)
// ============================================================================

/// Foundation types: DocumentId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: parsed documents and traversal helpers
pub mod syntax;

/// High-level IR: scopes, index, linking, validation
pub mod hir;

/// Project orchestration: the document builder
pub mod project;

/// IDE features: analysis snapshots, goto-definition, symbol search
pub mod ide;

// Re-export foundation types
pub use base::{DocumentId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Diagnostic, Severity, Symbol, SymbolKind};
pub use project::{BuildError, BuildReport, BuilderServices, DocumentBuilder, EngineConfig};
