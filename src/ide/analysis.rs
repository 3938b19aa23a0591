//! AnalysisHost and Analysis: path-keyed state management for editors.
//!
//! The `AnalysisHost` owns the [`DocumentBuilder`] and batches edits; an
//! `Analysis` snapshot rebuilds whatever changed, then answers queries.
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_content("file:///main.bbj", "goto done\ndone:\n");
//!
//! let analysis = host.analysis();
//! let diagnostics = analysis.diagnostics("file:///main.bbj");
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::base::{DocumentId, LineCol};
use crate::hir::{ClassCatalog, Diagnostic};
use crate::project::{BuildReport, BuilderServices, DocumentBuilder, EngineConfig};

use super::{GotoResult, SymbolInfo};

/// Owns all mutable state for the IDE layer.
pub struct AnalysisHost {
    builder: DocumentBuilder,
    pending: BTreeSet<DocumentId>,
    last_report: BuildReport,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_builder(DocumentBuilder::default())
    }

    pub fn with_config(config: EngineConfig, catalog: Arc<dyn ClassCatalog>) -> Self {
        let services = BuilderServices::from_config(&config, catalog);
        Self::with_builder(DocumentBuilder::new(config, services))
    }

    pub fn with_builder(builder: DocumentBuilder) -> Self {
        Self {
            builder,
            pending: BTreeSet::new(),
            last_report: BuildReport::default(),
        }
    }

    /// Sets the content of a file. The rebuild happens on the next
    /// [`analysis`](Self::analysis).
    pub fn set_file_content(&mut self, path: &str, content: &str) -> DocumentId {
        let id = self.builder.open_document(path, content);
        self.pending.insert(id);
        id
    }

    /// Removes a file and relinks the files that referred to it.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let Some(id) = self.builder.document_id(path) else {
            return false;
        };
        self.pending.remove(&id);
        match self.builder.remove_document(id) {
            Ok(report) => {
                self.last_report = report;
                true
            }
            Err(error) => {
                tracing::debug!(%error, "remove_file");
                false
            }
        }
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.builder.document_id(path).is_some()
    }

    pub fn file_count(&self) -> usize {
        self.builder.document_count()
    }

    /// Drops cached Java lookups; every file is relinked.
    pub fn reload_catalog(&mut self) {
        self.last_report = self.builder.reload_catalog();
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Report of the last pass that did any work.
    pub fn last_report(&self) -> &BuildReport {
        &self.last_report
    }

    pub fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    /// A consistent snapshot, rebuilding pending files first.
    pub fn analysis(&mut self) -> Analysis<'_> {
        if !self.pending.is_empty() {
            let ids: Vec<_> = std::mem::take(&mut self.pending).into_iter().collect();
            self.last_report = self.builder.rebuild(&ids);
        }
        Analysis {
            builder: &self.builder,
        }
    }
}

/// An immutable snapshot of the analysis state.
pub struct Analysis<'a> {
    builder: &'a DocumentBuilder,
}

impl<'a> Analysis<'a> {
    pub fn file_id(&self, path: &str) -> Option<DocumentId> {
        self.builder.document_id(path)
    }

    /// Diagnostics of a file; empty for unknown paths.
    pub fn diagnostics(&self, path: &str) -> &'a [Diagnostic] {
        self.file_id(path)
            .and_then(|id| self.builder.diagnostics(id))
            .unwrap_or_default()
    }

    pub fn goto_definition(&self, path: &str, line: u32, col: u32) -> GotoResult {
        match self.file_id(path) {
            Some(id) => super::goto_definition(self.builder, id, LineCol::new(line, col)),
            None => GotoResult::default(),
        }
    }

    pub fn document_symbols(&self, path: &str) -> Vec<SymbolInfo> {
        match self.file_id(path) {
            Some(id) => super::document_symbols(self.builder, id),
            None => Vec::new(),
        }
    }

    pub fn workspace_symbols(&self, query: Option<&str>) -> Vec<SymbolInfo> {
        super::workspace_symbols(self.builder, query)
    }

    pub fn builder(&self) -> &'a DocumentBuilder {
        self.builder
    }
}
