//! Symbols: resolvable declarations.
//!
//! A [`Symbol`] is produced by scope computation for a document declaration,
//! or by the interop resolver for a Java class or member. Symbols never own
//! the AST: a document symbol points at its declaring node through
//! [`SymbolOrigin::Document`], which keeps the node id and the document id
//! together so they can never diverge.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::DocumentId;
use crate::parser::NodeId;

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolKind {
    Variable,
    Procedure,
    Class,
    Label,
    Field,
    ExternalClass,
    ExternalMember,
}

impl SymbolKind {
    /// Get a display string for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Procedure => "procedure",
            SymbolKind::Class => "class",
            SymbolKind::Label => "label",
            SymbolKind::Field => "field",
            SymbolKind::ExternalClass => "Java class",
            SymbolKind::ExternalMember => "Java member",
        }
    }

    /// Symbols that come from the interop catalog rather than a document.
    pub fn is_external(&self) -> bool {
        matches!(self, SymbolKind::ExternalClass | SymbolKind::ExternalMember)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Visibility {
    Local,
    Exported,
}

/// Where a symbol was declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolOrigin {
    Document { document: DocumentId, node: NodeId },
    External { qualified_name: SmolStr },
}

/// A resolvable declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Symbol {
    /// Canonical name as computed by the name provider.
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub visibility: Visibility,
    pub origin: SymbolOrigin,
    /// Range of the declaring name; empty for external symbols.
    pub range: TextRange,
    /// Extra information, such as the Java class a `use` statement imports.
    pub detail: Option<SmolStr>,
}

impl Symbol {
    pub fn document(&self) -> Option<DocumentId> {
        match &self.origin {
            SymbolOrigin::Document { document, .. } => Some(*document),
            SymbolOrigin::External { .. } => None,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match &self.origin {
            SymbolOrigin::Document { node, .. } => Some(*node),
            SymbolOrigin::External { .. } => None,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }

    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// The exported symbols of one document.
///
/// Rebuilt from scratch on every reparse; the workspace index replaces the
/// previous set wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSet {
    pub document: DocumentId,
    pub uri: SmolStr,
    pub symbols: Vec<Symbol>,
}

impl ExportSet {
    pub fn new(document: DocumentId, uri: impl Into<SmolStr>) -> Self {
        Self {
            document,
            uri: uri.into(),
            symbols: Vec::new(),
        }
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Exported symbols with the given canonical name, in declaration order.
    pub fn lookup<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.symbols.iter().map(|s| &s.name)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}
