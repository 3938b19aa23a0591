//! Binding reference sites to symbols.
//!
//! For each [`ReferenceSite`] the linker asks the scope provider for
//! candidates and then:
//!
//! - candidates from a single document: bind the first,
//! - candidates spread over several other documents: report an ambiguity,
//!   leave unbound,
//! - none: report by reference kind (variables and labels stay silent here).
//!
//! Linking never mutates the scope tree or the index, so it can be repeated
//! for a document whenever a dependency changes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::scope::{ReferenceKind, ReferenceSite};
use super::scope_provider::{CandidateSource, ScopeContext, ScopeProviderStrategy};
use super::symbols::Symbol;
use crate::base::DocumentId;
use crate::parser::NodeId;

/// Bindings and link errors for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkResult {
    pub bindings: BTreeMap<NodeId, Symbol>,
    pub unresolved: BTreeSet<NodeId>,
    pub ambiguous: BTreeMap<NodeId, Vec<Symbol>>,
    /// Names looked up in the workspace index, resolved or not.
    pub workspace_names: BTreeSet<SmolStr>,
    /// Other documents that at least one binding points into.
    pub bound_documents: BTreeSet<DocumentId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LinkResult {
    pub fn binding(&self, node: NodeId) -> Option<&Symbol> {
        self.bindings.get(&node)
    }

    pub fn is_bound(&self, node: NodeId) -> bool {
        self.bindings.contains_key(&node)
    }
}

pub struct Linker {
    provider: Arc<dyn ScopeProviderStrategy>,
    report_unresolved_interop: bool,
}

impl Linker {
    pub fn new(provider: Arc<dyn ScopeProviderStrategy>) -> Self {
        Self {
            provider,
            report_unresolved_interop: true,
        }
    }

    pub fn with_unresolved_interop(mut self, report: bool) -> Self {
        self.report_unresolved_interop = report;
        self
    }

    pub fn link(&self, ctx: &ScopeContext<'_>, references: &[ReferenceSite]) -> LinkResult {
        let mut result = LinkResult::default();
        let mut diagnostics = DiagnosticCollector::new(ctx.document);

        for site in references {
            let candidates = self.provider.candidates(ctx, site);
            if candidates.consulted_workspace {
                result.workspace_names.insert(site.name.clone());
            }

            let from_workspace = candidates.source == Some(CandidateSource::Workspace);
            let mut symbols = candidates.symbols;
            if from_workspace && distinct_documents(&symbols) > 1 {
                diagnostics.ambiguous_reference(site.node, site.range, &site.text, &symbols, |doc| {
                    ctx.index.document_uri(doc)
                });
                result.ambiguous.insert(site.node, symbols);
            } else if symbols.is_empty() {
                result.unresolved.insert(site.node);
                self.report_unresolved(&mut diagnostics, site);
            } else {
                let first = symbols.swap_remove(0);
                if let Some(document) = first.document().filter(|doc| *doc != ctx.document) {
                    result.bound_documents.insert(document);
                }
                result.bindings.insert(site.node, first);
            }
        }

        tracing::trace!(
            document = %ctx.document,
            references = references.len(),
            bound = result.bindings.len(),
            unresolved = result.unresolved.len(),
            ambiguous = result.ambiguous.len(),
            "linked"
        );
        result.diagnostics = diagnostics.finish();
        result
    }

    fn report_unresolved(&self, diagnostics: &mut DiagnosticCollector, site: &ReferenceSite) {
        match &site.kind {
            // BBj variables need no declaration; labels belong to the validator
            ReferenceKind::Variable | ReferenceKind::Label => {}
            // inherited from a superclass the workspace may not know
            ReferenceKind::Field {
                class_has_supertype: true,
            } => {}
            ReferenceKind::JavaClass => {
                if self.report_unresolved_interop {
                    diagnostics.interop_not_found(site.node, site.range, &site.text);
                }
            }
            kind => {
                diagnostics.unresolved_reference(site.node, site.range, kind.display(), &site.text)
            }
        }
    }
}

/// Duplicates inside one exporting document are not ambiguous; they bind
/// the first declaration like lexical duplicates do.
fn distinct_documents(symbols: &[Symbol]) -> usize {
    symbols
        .iter()
        .filter_map(Symbol::document)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::diagnostics::codes;
    use crate::hir::index::WorkspaceIndex;
    use crate::hir::interop::{JavaClass, JavaInteropResolver, StaticCatalog};
    use crate::hir::names::BbjNameProvider;
    use crate::hir::scope::{DocumentScopes, compute_scopes};
    use crate::hir::scope_provider::DefaultScopeProvider;
    use crate::syntax::SyntaxFile;

    fn link(main: &str, others: &[&str]) -> (DocumentScopes, LinkResult) {
        let index = WorkspaceIndex::new();
        for (i, text) in others.iter().enumerate() {
            let doc = DocumentId::new(i as u32 + 1);
            let file = SyntaxFile::new(text);
            let uri = format!("file:///lib{}.bbj", i + 1);
            index.upsert_document(compute_scopes(doc, &uri, &file, &BbjNameProvider).exports);
        }
        let file = SyntaxFile::new(main);
        let scopes = compute_scopes(DocumentId::new(0), "file:///main.bbj", &file, &BbjNameProvider);
        index.upsert_document(scopes.exports.clone());
        let interop = JavaInteropResolver::new(Arc::new(
            StaticCatalog::new().with_class(JavaClass::new("java.util.HashMap")),
        ));
        let ctx = ScopeContext {
            document: DocumentId::new(0),
            scopes: &scopes.tree,
            exports: &scopes.exports,
            index: &index,
            interop: &interop,
        };
        let result = Linker::new(Arc::new(DefaultScopeProvider::default())).link(&ctx, &scopes.references);
        (scopes, result)
    }

    fn codes_of(result: &LinkResult) -> Vec<&str> {
        result.diagnostics.iter().filter_map(|d| d.code).collect()
    }

    #[test]
    fn test_binds_local_class() {
        let (_, result) = link("class public List\nclassend\nlet map = new List(err=*next)\n", &[]);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.bindings.len(), 1);
        assert!(result.bound_documents.is_empty());
    }

    #[test]
    fn test_binds_across_documents() {
        let (_, result) = link("declare Helper h!\n", &["class public Helper\nclassend\n"]);
        assert!(result.diagnostics.is_empty());
        assert_eq!(
            result.bound_documents.iter().copied().collect::<Vec<_>>(),
            vec![DocumentId::new(1)]
        );
        assert!(result.workspace_names.contains("Helper"));
    }

    #[test]
    fn test_ambiguous_workspace_reference() {
        let (_, result) = link(
            "declare Helper h!\n",
            &["class public Helper\nclassend\n", "class public Helper\nclassend\n"],
        );
        assert!(result.bindings.is_empty());
        assert_eq!(result.ambiguous.len(), 1);
        assert_eq!(codes_of(&result), vec![codes::AMBIGUOUS_REFERENCE]);
        let message = &result.diagnostics[0].message;
        assert!(message.contains("file:///lib1.bbj"), "{message}");
        assert!(message.contains("file:///lib2.bbj"), "{message}");
        assert_eq!(result.diagnostics[0].related.len(), 2);
    }

    #[test]
    fn test_duplicate_exports_in_one_document_bind_first() {
        let (_, result) = link(
            "declare Helper h!\n",
            &["class public Helper\nclassend\nclass public Helper\nclassend\n"],
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert!(result.ambiguous.is_empty());
        let bound = result.bindings.values().next().cloned();
        let bound = bound.expect("Helper binds");
        assert_eq!(bound.document(), Some(DocumentId::new(1)));
    }

    #[test]
    fn test_local_duplicates_bind_first() {
        let (scopes, result) = link("class A\nclassend\nclass A\nclassend\ndeclare A a!\n", &[]);
        let bound = result.bindings.values().next().cloned();
        let bound = bound.expect("A binds");
        assert_eq!(Some(bound), scopes.tree.symbols().first().cloned());
    }

    #[test]
    fn test_unresolved_class_reported() {
        let (_, result) = link("declare Missing m!\n", &[]);
        assert_eq!(codes_of(&result), vec![codes::UNRESOLVED_REFERENCE]);
        assert_eq!(
            &*result.diagnostics[0].message,
            "Could not resolve reference to class named 'Missing'."
        );
        assert_eq!(result.unresolved.len(), 1);
        assert!(result.workspace_names.contains("Missing"));
    }

    #[test]
    fn test_unresolved_variables_and_labels_are_silent() {
        let (_, result) = link("print y\ngoto nowhere\n", &[]);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.unresolved.len(), 2);
    }

    #[test]
    fn test_unresolved_procedure_reported() {
        let (_, result) = link("print fnmissing(1)\n", &[]);
        assert_eq!(codes_of(&result), vec![codes::UNRESOLVED_REFERENCE]);
    }

    #[test]
    fn test_inherited_field_not_reported() {
        let source = "class public B extends A\n  method public void m()\n    #inherited = 1\n  methodend\nclassend\nclass public A\nclassend\n";
        let (_, result) = link(source, &[]);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_missing_interop_class() {
        let (_, result) = link("use java.util.HashMap\nuse java.util.Nope\n", &[]);
        assert_eq!(codes_of(&result), vec![codes::INTEROP_NOT_FOUND]);
        assert_eq!(
            &*result.diagnostics[0].message,
            "Could not resolve Java class 'java.util.Nope'."
        );
    }
}
