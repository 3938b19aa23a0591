//! Cross-document dependencies recorded by the linker.
//!
//! A document depends on another when it bound a reference into it, or when
//! it looked a name up in the workspace index that the other document
//! exports now or exported before a change. Only exports cross document
//! boundaries, so relinking dependents never changes their exports and the
//! affected set is never transitive.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::linker::LinkResult;
use crate::base::DocumentId;

#[derive(Clone, Debug, Default)]
struct Edges {
    names: BTreeSet<SmolStr>,
    targets: BTreeSet<DocumentId>,
}

#[derive(Debug, Default)]
pub struct ReferenceGraph {
    forward: FxHashMap<DocumentId, Edges>,
    by_name: FxHashMap<SmolStr, BTreeSet<DocumentId>>,
    by_target: FxHashMap<DocumentId, BTreeSet<DocumentId>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the outgoing edges of `document` with those of a fresh link.
    pub fn record(&mut self, document: DocumentId, links: &LinkResult) {
        self.unlink(document);
        let edges = Edges {
            names: links.workspace_names.clone(),
            targets: links.bound_documents.clone(),
        };
        for name in &edges.names {
            self.by_name.entry(name.clone()).or_default().insert(document);
        }
        for target in &edges.targets {
            self.by_target.entry(*target).or_default().insert(document);
        }
        self.forward.insert(document, edges);
    }

    /// Forgets the outgoing edges of `document`. Edges pointing at it stay,
    /// so its dependents can still be found after removal.
    pub fn remove_document(&mut self, document: DocumentId) {
        self.unlink(document);
    }

    fn unlink(&mut self, document: DocumentId) {
        let Some(edges) = self.forward.remove(&document) else {
            return;
        };
        for name in &edges.names {
            if let Some(users) = self.by_name.get_mut(name) {
                users.remove(&document);
                if users.is_empty() {
                    self.by_name.remove(name);
                }
            }
        }
        for target in &edges.targets {
            if let Some(users) = self.by_target.get_mut(target) {
                users.remove(&document);
                if users.is_empty() {
                    self.by_target.remove(target);
                }
            }
        }
    }

    /// Documents to relink after `changed` updated its exports.
    ///
    /// `names` are the names whose export status changed: exported before or
    /// after the update, not both unchanged. `changed` itself is excluded.
    pub fn dependents<'a>(
        &self,
        changed: DocumentId,
        names: impl IntoIterator<Item = &'a SmolStr>,
    ) -> BTreeSet<DocumentId> {
        let mut result: BTreeSet<DocumentId> = self
            .by_target
            .get(&changed)
            .cloned()
            .unwrap_or_default();
        for name in names {
            if let Some(users) = self.by_name.get(name) {
                result.extend(users.iter().copied());
            }
        }
        result.remove(&changed);
        result
    }

    /// Names `document` looked up in the workspace at its last link.
    pub fn workspace_names(&self, document: DocumentId) -> Option<&BTreeSet<SmolStr>> {
        self.forward.get(&document).map(|e| &e.names)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
