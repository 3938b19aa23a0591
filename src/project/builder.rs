//! The document builder: sequences every phase for changed documents.
//!
//! ```text
//! rebuild(ids)
//!   1. parse           salsa, memoized per document text
//!   2. compute scopes  rayon, one job per cleanly parsed document
//!   3. upsert exports  WorkspaceIndex, then collect dependents
//!   4. link + validate changed documents, then dependents, by id
//! ```
//!
//! A document whose parse fails keeps its previous exports (marked invalid)
//! and its diagnostics become the syntax errors. Each document carries a
//! [`CancellationToken`]; a cancelled document is skipped between phases and
//! never writes to the index.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use salsa::Setter;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::config::EngineConfig;
use super::error::BuildError;
use crate::base::DocumentId;
use crate::hir::{
    BbjNameProvider, ClassCatalog, DefaultScopeProvider, Diagnostic, DiagnosticCollector,
    DocumentScopes, DocumentText, JavaInteropResolver, LinkResult, Linker, NameProvider,
    ParseResult, ReferenceGraph, RootDatabase, ScopeContext, ScopeProviderStrategy, StaticCatalog,
    Symbol, ValidationContext, ValidatorRuleSet, WorkspaceIndex, compute_scopes, parse_document,
    sort_diagnostics,
};
use crate::parser::{NodeId, SyntaxError};
use crate::syntax::SyntaxFile;

/// The swappable strategies of the engine.
#[derive(Clone)]
pub struct BuilderServices {
    pub names: Arc<dyn NameProvider>,
    pub scope_provider: Arc<dyn ScopeProviderStrategy>,
    pub validator: ValidatorRuleSet,
    pub catalog: Arc<dyn ClassCatalog>,
}

impl Default for BuilderServices {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default(), Arc::new(StaticCatalog::new()))
    }
}

impl BuilderServices {
    /// Default strategies over the given class catalog.
    pub fn from_config(config: &EngineConfig, catalog: Arc<dyn ClassCatalog>) -> Self {
        Self {
            names: Arc::new(BbjNameProvider),
            scope_provider: Arc::new(DefaultScopeProvider::new(
                config.implicit_java_packages.clone(),
            )),
            validator: ValidatorRuleSet::default(),
            catalog,
        }
    }

    pub fn with_names(mut self, names: Arc<dyn NameProvider>) -> Self {
        self.names = names;
        self
    }

    pub fn with_scope_provider(mut self, provider: Arc<dyn ScopeProviderStrategy>) -> Self {
        self.scope_provider = provider;
        self
    }

    pub fn with_validator(mut self, validator: ValidatorRuleSet) -> Self {
        self.validator = validator;
        self
    }
}

/// What a build pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents parsed in this pass, clean or not.
    pub parsed: Vec<DocumentId>,
    /// Documents linked and validated, changed ones first.
    pub relinked: Vec<DocumentId>,
    pub failed: Vec<BuildError>,
    pub cancelled: Vec<DocumentId>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.cancelled.is_empty()
    }

    /// Failures followed by one [`BuildError::Cancelled`] per skipped document.
    pub fn errors(&self) -> impl Iterator<Item = BuildError> + '_ {
        self.failed
            .iter()
            .cloned()
            .chain(self.cancelled.iter().map(|id| BuildError::Cancelled(*id)))
    }
}

struct DocumentState {
    uri: SmolStr,
    input: DocumentText,
    /// Result of the latest parse, `None` before the first build.
    parse: Option<ParseResult>,
    /// Syntax and scopes of the last clean parse.
    syntax: Option<Arc<SyntaxFile>>,
    scopes: Option<Arc<DocumentScopes>>,
    links: LinkResult,
    diagnostics: Vec<Diagnostic>,
    cancel: CancellationToken,
}

impl DocumentState {
    fn parsed_cleanly(&self) -> bool {
        self.parse.as_ref().is_some_and(ParseResult::is_ok)
    }
}

/// Drives parsing, scoping, indexing, linking and validation.
///
/// Mutation goes through `&mut self`, so passes never overlap. The index and
/// the interop resolver are shared and may be read from other threads.
pub struct DocumentBuilder {
    config: EngineConfig,
    db: RootDatabase,
    names: Arc<dyn NameProvider>,
    linker: Linker,
    validator: ValidatorRuleSet,
    index: Arc<WorkspaceIndex>,
    interop: Arc<JavaInteropResolver>,
    graph: ReferenceGraph,
    documents: BTreeMap<DocumentId, DocumentState>,
    by_uri: FxHashMap<SmolStr, DocumentId>,
    next_id: u32,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(EngineConfig::default(), BuilderServices::default())
    }
}

impl DocumentBuilder {
    pub fn new(config: EngineConfig, services: BuilderServices) -> Self {
        let linker = Linker::new(services.scope_provider)
            .with_unresolved_interop(config.report_unresolved_interop);
        Self {
            db: RootDatabase::new(),
            names: services.names,
            linker,
            validator: services.validator,
            index: Arc::new(WorkspaceIndex::new()),
            interop: Arc::new(JavaInteropResolver::new(services.catalog)),
            graph: ReferenceGraph::new(),
            documents: BTreeMap::new(),
            by_uri: FxHashMap::default(),
            next_id: 0,
            config,
        }
    }

    pub fn with_catalog(catalog: Arc<dyn ClassCatalog>) -> Self {
        let config = EngineConfig::default();
        let services = BuilderServices::from_config(&config, catalog);
        Self::new(config, services)
    }

    // ------------------------------------------------------------------------
    // Document set
    // ------------------------------------------------------------------------

    /// Registers or updates the text of the document at `uri`.
    ///
    /// Updating cancels any pass still holding the previous token. Nothing is
    /// rebuilt until [`rebuild`](Self::rebuild).
    pub fn open_document(&mut self, uri: impl Into<SmolStr>, text: impl Into<String>) -> DocumentId {
        let uri = uri.into();
        let text = text.into();
        if let Some(&id) = self.by_uri.get(&uri) {
            if let Some(state) = self.documents.get_mut(&id) {
                state.cancel.cancel();
                state.cancel = CancellationToken::new();
                let input = state.input;
                input.set_text(&mut self.db).to(text);
                tracing::debug!(document = %id, uri = %uri, "document updated");
                return id;
            }
        }

        let id = DocumentId::new(self.next_id);
        self.next_id += 1;
        let input = DocumentText::new(&self.db, id, text);
        self.documents.insert(
            id,
            DocumentState {
                uri: uri.clone(),
                input,
                parse: None,
                syntax: None,
                scopes: None,
                links: LinkResult::default(),
                diagnostics: Vec::new(),
                cancel: CancellationToken::new(),
            },
        );
        self.by_uri.insert(uri.clone(), id);
        tracing::debug!(document = %id, uri = %uri, "document opened");
        id
    }

    /// Drops a document and its exports, then relinks the documents that
    /// depended on it.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<BuildReport, BuildError> {
        let state = self
            .documents
            .remove(&id)
            .ok_or(BuildError::UnknownDocument(id))?;
        state.cancel.cancel();
        self.by_uri.remove(&state.uri);
        let names = self.index.remove_document(id).unwrap_or_default();
        let dependents = self.graph.dependents(id, &names);
        self.graph.remove_document(id);
        tracing::debug!(document = %id, dependents = dependents.len(), "document removed");

        let mut report = BuildReport::default();
        for dependent in dependents {
            self.relink(dependent, &mut report);
        }
        Ok(report)
    }

    // ------------------------------------------------------------------------
    // Build passes
    // ------------------------------------------------------------------------

    /// Rebuilds `ids` and every document depending on their exports.
    pub fn rebuild(&mut self, ids: &[DocumentId]) -> BuildReport {
        let mut report = BuildReport::default();
        let requested: BTreeSet<DocumentId> = ids.iter().copied().collect();
        tracing::debug!(documents = requested.len(), "rebuild started");

        // 1. parse
        let mut clean = Vec::new();
        for id in requested {
            let Some(state) = self.documents.get(&id) else {
                report.failed.push(BuildError::UnknownDocument(id));
                continue;
            };
            let cancel = state.cancel.clone();
            if cancel.is_cancelled() {
                report.cancelled.push(id);
                continue;
            }
            let parse = parse_document(&self.db, state.input);
            report.parsed.push(id);
            match parse.syntax_file().filter(|_| parse.is_ok()).cloned() {
                Some(file) => clean.push((id, state.uri.clone(), file, cancel)),
                None => self.record_parse_failure(id, &parse.errors, &mut report),
            }
            if let Some(state) = self.documents.get_mut(&id) {
                state.parse = Some(parse);
            }
        }

        // 2. scopes
        let names = &*self.names;
        let compute = |(id, uri, file, cancel): &(DocumentId, SmolStr, Arc<SyntaxFile>, CancellationToken)| {
            if cancel.is_cancelled() {
                return (*id, None);
            }
            (*id, Some((Arc::clone(file), compute_scopes(*id, uri, file, names))))
        };
        let computed: Vec<_> = if self.config.parallel_scopes {
            clean.par_iter().map(compute).collect()
        } else {
            clean.iter().map(compute).collect()
        };

        // 3. index
        let mut changed = BTreeSet::new();
        let mut dependents = BTreeSet::new();
        for (id, result) in computed {
            let cancelled = self
                .documents
                .get(&id)
                .is_none_or(|state| state.cancel.is_cancelled());
            let Some((file, scopes)) = result.filter(|_| !cancelled) else {
                report.cancelled.push(id);
                continue;
            };
            let mut names: BTreeSet<SmolStr> = self
                .index
                .upsert_document(scopes.exports.clone())
                .into_iter()
                .collect();
            names.extend(scopes.exports.names().cloned());
            dependents.extend(self.graph.dependents(id, &names));
            changed.insert(id);
            if let Some(state) = self.documents.get_mut(&id) {
                state.syntax = Some(file);
                state.scopes = Some(Arc::new(scopes));
            }
        }

        // 4. link and validate
        for id in &changed {
            self.relink(*id, &mut report);
        }
        for id in dependents.difference(&changed) {
            self.relink(*id, &mut report);
        }

        tracing::debug!(
            parsed = report.parsed.len(),
            relinked = report.relinked.len(),
            failed = report.failed.len(),
            cancelled = report.cancelled.len(),
            "rebuild finished"
        );
        report
    }

    /// Rebuilds every open document.
    pub fn rebuild_all(&mut self) -> BuildReport {
        let ids: Vec<_> = self.documents.keys().copied().collect();
        self.rebuild(&ids)
    }

    /// Drops cached Java lookups and relinks every document.
    pub fn reload_catalog(&mut self) -> BuildReport {
        self.interop.reload();
        self.relink_all()
    }

    /// Swaps the class catalog and relinks every document.
    pub fn replace_catalog(&mut self, catalog: Arc<dyn ClassCatalog>) -> BuildReport {
        self.interop.replace_catalog(catalog);
        self.relink_all()
    }

    fn relink_all(&mut self) -> BuildReport {
        let mut report = BuildReport::default();
        let ids: Vec<_> = self.documents.keys().copied().collect();
        for id in ids {
            self.relink(id, &mut report);
        }
        report
    }

    fn record_parse_failure(&mut self, id: DocumentId, errors: &[SyntaxError], report: &mut BuildReport) {
        let Some(state) = self.documents.get_mut(&id) else {
            return;
        };
        self.index.mark_invalid(id);
        let mut diagnostics = DiagnosticCollector::new(id);
        diagnostics.syntax_errors(errors);
        state.diagnostics = diagnostics.finish();
        state.links = LinkResult::default();
        tracing::debug!(document = %id, errors = errors.len(), "parse failed");
        report.failed.push(BuildError::ParseFailure {
            document: id,
            uri: state.uri.clone(),
            errors: errors.len(),
        });
    }

    /// Links and validates one document against the current index.
    fn relink(&mut self, id: DocumentId, report: &mut BuildReport) {
        let Some(state) = self.documents.get(&id) else {
            return;
        };
        if !state.parsed_cleanly() {
            return;
        }
        if state.cancel.is_cancelled() {
            report.cancelled.push(id);
            return;
        }
        let (Some(file), Some(scopes)) = (state.syntax.clone(), state.scopes.clone()) else {
            return;
        };

        let ctx = ScopeContext {
            document: id,
            scopes: &scopes.tree,
            exports: &scopes.exports,
            index: &self.index,
            interop: &self.interop,
        };
        let links = self.linker.link(&ctx, &scopes.references);
        let mut diagnostics = links.diagnostics.clone();
        diagnostics.extend(self.validator.validate(&ValidationContext {
            document: id,
            file: &file,
            scopes: &scopes.tree,
            references: &scopes.references,
            links: &links,
        }));
        sort_diagnostics(&mut diagnostics);

        self.graph.record(id, &links);
        if let Some(state) = self.documents.get_mut(&id) {
            state.links = links;
            state.diagnostics = diagnostics;
        }
        report.relinked.push(id);
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Exported symbols named `name` across the workspace.
    pub fn lookup_workspace_symbol(&self, name: &str) -> Vec<Symbol> {
        self.index.lookup(name)
    }

    /// Diagnostics of the last pass over `id`.
    pub fn diagnostics(&self, id: DocumentId) -> Option<&[Diagnostic]> {
        self.documents.get(&id).map(|s| s.diagnostics.as_slice())
    }

    /// The symbol a reference node was bound to.
    pub fn binding(&self, id: DocumentId, node: NodeId) -> Option<&Symbol> {
        self.documents.get(&id)?.links.binding(node)
    }

    pub fn links(&self, id: DocumentId) -> Option<&LinkResult> {
        self.documents.get(&id).map(|s| &s.links)
    }

    pub fn cancellation_token(&self, id: DocumentId) -> Option<CancellationToken> {
        self.documents.get(&id).map(|s| s.cancel.clone())
    }

    pub fn syntax(&self, id: DocumentId) -> Option<&Arc<SyntaxFile>> {
        self.documents.get(&id)?.syntax.as_ref()
    }

    pub fn scopes(&self, id: DocumentId) -> Option<&Arc<DocumentScopes>> {
        self.documents.get(&id)?.scopes.as_ref()
    }

    pub fn document_id(&self, uri: &str) -> Option<DocumentId> {
        self.by_uri.get(uri).copied()
    }

    pub fn uri(&self, id: DocumentId) -> Option<&SmolStr> {
        self.documents.get(&id).map(|s| &s.uri)
    }

    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn index(&self) -> &Arc<WorkspaceIndex> {
        &self.index
    }

    pub fn interop(&self) -> &Arc<JavaInteropResolver> {
        &self.interop
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
