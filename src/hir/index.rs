//! Workspace index: exported symbols of every document, by name.
//!
//! Each document contributes one [`ExportSet`]. Upserting a document replaces
//! its previous set under a single write lock, so readers observe either the
//! old set or the new one, never a mix. Names exported by several documents
//! keep every candidate; ambiguity is for the linker to report.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbols::{ExportSet, Symbol};
use crate::base::DocumentId;

#[derive(Debug)]
struct DocumentEntry {
    exports: Arc<ExportSet>,
    /// False while the last reparse failed and `exports` is stale.
    valid: bool,
}

#[derive(Debug, Default)]
struct IndexState {
    documents: BTreeMap<DocumentId, DocumentEntry>,
    /// Name -> (document, position in its export set), ordered by document.
    by_name: FxHashMap<SmolStr, Vec<(DocumentId, usize)>>,
}

impl IndexState {
    fn unlink(&mut self, document: DocumentId) -> Option<DocumentEntry> {
        let entry = self.documents.remove(&document)?;
        for name in entry.exports.names() {
            if let Some(list) = self.by_name.get_mut(name) {
                list.retain(|(doc, _)| *doc != document);
                if list.is_empty() {
                    self.by_name.remove(name);
                }
            }
        }
        Some(entry)
    }

    fn link(&mut self, exports: Arc<ExportSet>, valid: bool) {
        let document = exports.document;
        for (position, symbol) in exports.symbols.iter().enumerate() {
            let list = self.by_name.entry(symbol.name.clone()).or_default();
            let at = list.partition_point(|(doc, pos)| (*doc, *pos) < (document, position));
            list.insert(at, (document, position));
        }
        self.documents
            .insert(document, DocumentEntry { exports, valid });
    }
}

/// Thread-safe `name -> symbols` index over all documents of a workspace.
#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    state: RwLock<IndexState>,
}

impl WorkspaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the export set of `exports.document`. Idempotent.
    ///
    /// Returns the names exported before the update, so callers can work out
    /// which other documents may need relinking.
    pub fn upsert_document(&self, exports: ExportSet) -> Vec<SmolStr> {
        let mut state = self.state.write();
        let document = exports.document;
        let previous = state
            .unlink(document)
            .map(|entry| entry.exports.names().cloned().collect())
            .unwrap_or_default();
        tracing::debug!(
            document = %document,
            exports = exports.len(),
            "index upsert"
        );
        state.link(Arc::new(exports), true);
        previous
    }

    /// Drops every entry of `document`. Returns the names it exported.
    pub fn remove_document(&self, document: DocumentId) -> Option<Vec<SmolStr>> {
        let mut state = self.state.write();
        let entry = state.unlink(document)?;
        tracing::debug!(document = %document, "index remove");
        Some(entry.exports.names().cloned().collect())
    }

    /// Keeps the document's previous exports visible but flags them stale.
    pub fn mark_invalid(&self, document: DocumentId) {
        let mut state = self.state.write();
        if let Some(entry) = state.documents.get_mut(&document) {
            entry.valid = false;
        }
    }

    /// `None` for unknown documents.
    pub fn is_valid(&self, document: DocumentId) -> Option<bool> {
        self.state.read().documents.get(&document).map(|e| e.valid)
    }

    /// All exported symbols named `name`, ordered by document then declaration.
    pub fn lookup(&self, name: &str) -> Vec<Symbol> {
        let state = self.state.read();
        let Some(list) = state.by_name.get(name) else {
            return Vec::new();
        };
        list.iter()
            .filter_map(|(doc, pos)| {
                state
                    .documents
                    .get(doc)
                    .and_then(|entry| entry.exports.symbols.get(*pos))
                    .cloned()
            })
            .collect()
    }

    /// Symbols whose name matches `predicate`, in the same order as [`Self::lookup`].
    pub fn search(&self, predicate: impl Fn(&str) -> bool) -> Vec<Symbol> {
        let state = self.state.read();
        state
            .documents
            .values()
            .flat_map(|entry| entry.exports.symbols.iter())
            .filter(|symbol| predicate(&symbol.name))
            .cloned()
            .collect()
    }

    pub fn exports_of(&self, document: DocumentId) -> Option<Arc<ExportSet>> {
        self.state
            .read()
            .documents
            .get(&document)
            .map(|e| Arc::clone(&e.exports))
    }

    pub fn document_uri(&self, document: DocumentId) -> Option<SmolStr> {
        self.state
            .read()
            .documents
            .get(&document)
            .map(|e| e.exports.uri.clone())
    }

    pub fn documents(&self) -> Vec<DocumentId> {
        self.state.read().documents.keys().copied().collect()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().documents.is_empty()
    }
}
