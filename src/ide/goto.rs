//! Go-to-definition over linker bindings.

use smol_str::SmolStr;

use super::symbols::line_cols;
use crate::base::{DocumentId, LineCol};
use crate::hir::{ReferenceSite, Symbol, SymbolKind, SymbolOrigin};
use crate::project::DocumentBuilder;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GotoResult {
    /// Several targets when the reference is ambiguous.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Where a symbol is declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// `None` for Java classes and members.
    pub document: Option<DocumentId>,
    pub uri: Option<SmolStr>,
    /// Dotted Java name of catalog symbols.
    pub qualified_name: Option<SmolStr>,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl GotoTarget {
    fn new(builder: &DocumentBuilder, symbol: &Symbol) -> Self {
        let (document, qualified_name) = match &symbol.origin {
            SymbolOrigin::Document { document, .. } => (Some(*document), None),
            SymbolOrigin::External { qualified_name } => (None, Some(qualified_name.clone())),
        };
        let (start, end) = document
            .map(|doc| line_cols(builder, doc, symbol.range))
            .unwrap_or_default();
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            document,
            uri: document.and_then(|doc| builder.uri(doc).cloned()),
            qualified_name,
            start_line: start.line,
            start_col: start.col,
            end_line: end.line,
            end_col: end.col,
        }
    }
}

/// The reference site under `position`, if any.
pub fn reference_at(
    builder: &DocumentBuilder,
    document: DocumentId,
    position: LineCol,
) -> Option<&ReferenceSite> {
    let offset = builder.syntax(document)?.line_index().offset(position)?;
    builder
        .scopes(document)?
        .references
        .iter()
        .find(|site| site.range.contains_inclusive(offset))
}

/// Declaration(s) of the reference under `position`.
pub fn goto_definition(builder: &DocumentBuilder, document: DocumentId, position: LineCol) -> GotoResult {
    let Some(site) = reference_at(builder, document, position) else {
        return GotoResult::default();
    };
    let Some(links) = builder.links(document) else {
        return GotoResult::default();
    };
    let symbols: Vec<&Symbol> = match links.binding(site.node) {
        Some(symbol) => vec![symbol],
        None => links
            .ambiguous
            .get(&site.node)
            .map(|candidates| candidates.iter().collect())
            .unwrap_or_default(),
    };
    GotoResult {
        targets: symbols
            .into_iter()
            .map(|symbol| GotoTarget::new(builder, symbol))
            .collect(),
    }
}
