//! Candidate lookup for reference sites.
//!
//! The default strategy searches, first match wins:
//!
//! 1. the lexical scope chain, innermost first,
//! 2. the document's own export set,
//! 3. the workspace index (other documents),
//! 4. the Java interop catalog.
//!
//! Dotted Java names skip straight to step 4. Each reference kind narrows
//! this order; see [`DefaultScopeProvider`].

use smol_str::SmolStr;

use super::index::WorkspaceIndex;
use super::interop::JavaInteropResolver;
use super::scope::{ReferenceKind, ReferenceSite, ScopeKind, ScopeTree};
use super::symbols::{ExportSet, Symbol};
use crate::base::DocumentId;

/// Everything a strategy may consult while resolving one document.
#[derive(Clone, Copy)]
pub struct ScopeContext<'a> {
    pub document: DocumentId,
    pub scopes: &'a ScopeTree,
    pub exports: &'a ExportSet,
    pub index: &'a WorkspaceIndex,
    pub interop: &'a JavaInteropResolver,
}

/// Which lookup step produced the candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    Lexical,
    DocumentExports,
    Workspace,
    Interop,
}

/// Candidates for one reference site, all of a legal kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    pub symbols: Vec<Symbol>,
    pub source: Option<CandidateSource>,
    /// Set when the workspace index was consulted, whatever the outcome.
    /// The document then depends on every document exporting this name.
    pub consulted_workspace: bool,
}

impl Candidates {
    fn found(symbols: Vec<Symbol>, source: CandidateSource, consulted_workspace: bool) -> Self {
        Self {
            symbols,
            source: Some(source),
            consulted_workspace,
        }
    }

    fn none(consulted_workspace: bool) -> Self {
        Self {
            consulted_workspace,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Produces the candidate symbols for a reference site.
pub trait ScopeProviderStrategy: Send + Sync {
    fn candidates(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite) -> Candidates;
}

/// BBj scoping rules.
///
/// - Variables search the lexical chain only up to the enclosing procedure;
///   module variables reach into procedures through `global` exports.
/// - `#field` references search the nearest class scope only.
/// - Labels never leave their document.
/// - `use ::file::Class` searches other documents only, filtered by path.
/// - Simple type names that nothing declares are tried against the implicit
///   Java packages (`java.lang` by default).
#[derive(Clone, Debug)]
pub struct DefaultScopeProvider {
    implicit_packages: Vec<SmolStr>,
}

impl Default for DefaultScopeProvider {
    fn default() -> Self {
        Self::new(vec![SmolStr::new_static("java.lang")])
    }
}

impl DefaultScopeProvider {
    pub fn new(implicit_packages: Vec<SmolStr>) -> Self {
        Self { implicit_packages }
    }

    fn lexical(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite) -> Vec<Symbol> {
        let legal = site.kind.legal_kinds();
        for id in ctx.scopes.ancestors(site.scope) {
            let scope = ctx.scopes.scope(id);
            if matches!(site.kind, ReferenceKind::Field { .. }) && scope.kind != ScopeKind::Class {
                continue;
            }
            let matches: Vec<Symbol> = ctx
                .scopes
                .lookup_local(id, &site.name)
                .filter(|s| legal.contains(&s.kind))
                .cloned()
                .collect();
            if !matches.is_empty() {
                return matches;
            }
            let boundary = match site.kind {
                ReferenceKind::Field { .. } => scope.kind == ScopeKind::Class,
                ReferenceKind::Variable => scope.kind == ScopeKind::Procedure,
                _ => false,
            };
            if boundary {
                break;
            }
        }
        Vec::new()
    }

    fn own_exports(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite) -> Vec<Symbol> {
        let legal = site.kind.legal_kinds();
        ctx.exports
            .lookup(&site.name)
            .filter(|s| legal.contains(&s.kind))
            .cloned()
            .collect()
    }

    fn workspace(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite, path: Option<&str>) -> Vec<Symbol> {
        let legal = site.kind.legal_kinds();
        ctx.index
            .lookup(&site.name)
            .into_iter()
            .filter(|s| legal.contains(&s.kind))
            .filter(|s| s.document() != Some(ctx.document))
            .filter(|s| match (path, s.document()) {
                (Some(path), Some(doc)) => ctx
                    .index
                    .document_uri(doc)
                    .is_some_and(|uri| uri_matches(&uri, path)),
                _ => true,
            })
            .collect()
    }

    fn implicit_interop(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite) -> Vec<Symbol> {
        self.implicit_packages
            .iter()
            .find_map(|package| {
                ctx.interop
                    .resolve(&format!("{package}.{}", site.text))
                    .symbol()
            })
            .into_iter()
            .collect()
    }
}

impl ScopeProviderStrategy for DefaultScopeProvider {
    fn candidates(&self, ctx: &ScopeContext<'_>, site: &ReferenceSite) -> Candidates {
        match &site.kind {
            ReferenceKind::JavaClass => {
                return match ctx.interop.resolve(&site.text).symbol() {
                    Some(symbol) => Candidates::found(vec![symbol], CandidateSource::Interop, false),
                    None => Candidates::none(false),
                };
            }
            ReferenceKind::BbjClassImport { path } => {
                let found = self.workspace(ctx, site, path.as_deref());
                if found.is_empty() {
                    return Candidates::none(true);
                }
                return Candidates::found(found, CandidateSource::Workspace, true);
            }
            _ => {}
        }

        let lexical = self.lexical(ctx, site);
        if !lexical.is_empty() {
            return Candidates::found(lexical, CandidateSource::Lexical, false);
        }

        let exported = self.own_exports(ctx, site);
        if !exported.is_empty() {
            return Candidates::found(exported, CandidateSource::DocumentExports, false);
        }

        // labels and fields never leave the document
        if matches!(site.kind, ReferenceKind::Label | ReferenceKind::Field { .. }) {
            return Candidates::none(false);
        }

        let workspace = self.workspace(ctx, site, None);
        if !workspace.is_empty() {
            return Candidates::found(workspace, CandidateSource::Workspace, true);
        }

        if site.kind == ReferenceKind::Type {
            let interop = self.implicit_interop(ctx, site);
            if !interop.is_empty() {
                return Candidates::found(interop, CandidateSource::Interop, true);
            }
        }
        Candidates::none(true)
    }
}

/// `path` as written in a `use` statement matches the end of a document URI.
fn uri_matches(uri: &str, path: &str) -> bool {
    let path = path.trim_start_matches("./").replace('\\', "/");
    let uri = uri.replace('\\', "/");
    uri == path || uri.ends_with(&format!("/{path}"))
}
