//! Workspace and document symbol listings.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{DocumentId, LineCol};
use crate::hir::{Symbol, SymbolKind};
use crate::project::DocumentBuilder;

/// A symbol with its location, ready for an editor outline or search list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub document: DocumentId,
    pub uri: SmolStr,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
}

impl SymbolInfo {
    pub(crate) fn from_symbol(builder: &DocumentBuilder, symbol: &Symbol) -> Option<Self> {
        let document = symbol.document()?;
        let uri = builder.uri(document)?.clone();
        let (start, end) = line_cols(builder, document, symbol.range);
        Some(Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            document,
            uri,
            start_line: start.line,
            start_col: start.col,
            end_line: end.line,
            end_col: end.col,
        })
    }
}

/// Start and end of `range` in `document`; zero when the document has no
/// syntax yet.
pub(crate) fn line_cols(builder: &DocumentBuilder, document: DocumentId, range: TextRange) -> (LineCol, LineCol) {
    match builder.syntax(document) {
        Some(file) => (
            file.line_index().line_col(range.start()),
            file.line_index().line_col(range.end()),
        ),
        None => (LineCol::default(), LineCol::default()),
    }
}

/// Exported symbols of every document, optionally filtered by a
/// case-insensitive substring of the name.
pub fn workspace_symbols(builder: &DocumentBuilder, query: Option<&str>) -> Vec<SymbolInfo> {
    let query = query.map(str::to_lowercase);
    let mut results: Vec<SymbolInfo> = builder
        .index()
        .search(|name| match &query {
            Some(q) => name.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .iter()
        .filter_map(|symbol| SymbolInfo::from_symbol(builder, symbol))
        .collect();
    results.sort_by(|a, b| a.name.cmp(&b.name).then(a.document.cmp(&b.document)));
    results
}

/// Every declaration of a document except variables and parameters.
pub fn document_symbols(builder: &DocumentBuilder, document: DocumentId) -> Vec<SymbolInfo> {
    let Some(scopes) = builder.scopes(document) else {
        return Vec::new();
    };
    scopes
        .tree
        .symbols()
        .iter()
        .filter(|symbol| symbol.kind != SymbolKind::Variable)
        .filter_map(|symbol| SymbolInfo::from_symbol(builder, symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> (DocumentBuilder, DocumentId) {
        let mut builder = DocumentBuilder::default();
        let a = builder.open_document(
            "file:///a.bbj",
            "class public Customer\n  field public BBjString name$\nclassend\nx = 1\nstart:\n",
        );
        let b = builder.open_document("file:///b.bbj", "class public CustomerList\nclassend\n");
        builder.rebuild(&[a, b]);
        (builder, a)
    }

    #[test]
    fn test_workspace_symbols_query() {
        let (builder, _) = builder();
        let names: Vec<_> = workspace_symbols(&builder, Some("customer"))
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Customer", "CustomerList"]);
        assert_eq!(workspace_symbols(&builder, None).len(), 3);
    }

    #[test]
    fn test_document_symbols_skip_variables() {
        let (builder, a) = builder();
        let symbols = document_symbols(&builder, a);
        let kinds: Vec<_> = symbols.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SymbolKind::Class, SymbolKind::Field, SymbolKind::Label]);
        let label = &symbols[2];
        assert_eq!((label.start_line, label.start_col), (4, 0));
    }
}
