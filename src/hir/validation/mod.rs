//! Semantic validation over a linked document.
//!
//! Rules are independent: each sees the same read-only [`ValidationContext`]
//! and appends to its own diagnostics. The order they run in does not change
//! the result, since diagnostics are sorted once all rules finish.

mod keyed;
mod labels;
mod options;

use std::sync::Arc;

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::linker::LinkResult;
use super::scope::{ReferenceSite, ScopeTree};
use crate::base::DocumentId;
use crate::syntax::SyntaxFile;

pub use keyed::KeyedModeRule;
pub use labels::{DuplicateLabelRule, UndefinedLabelRule};
pub use options::{OptionTable, StatementOptionRule};

/// What a rule may look at.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub document: DocumentId,
    pub file: &'a SyntaxFile,
    pub scopes: &'a ScopeTree,
    pub references: &'a [ReferenceSite],
    pub links: &'a LinkResult,
}

pub trait ValidationRule: Send + Sync {
    /// Stable identifier, used to disable a rule.
    fn id(&self) -> &'static str;

    fn check(&self, ctx: &ValidationContext<'_>, out: &mut DiagnosticCollector);
}

/// An ordered catalog of rules.
#[derive(Clone)]
pub struct ValidatorRuleSet {
    rules: Vec<Arc<dyn ValidationRule>>,
}

impl Default for ValidatorRuleSet {
    fn default() -> Self {
        Self::new()
            .with_rule(StatementOptionRule::default())
            .with_rule(KeyedModeRule)
            .with_rule(UndefinedLabelRule)
            .with_rule(DuplicateLabelRule)
    }
}

impl std::fmt::Debug for ValidatorRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl ValidatorRuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Drops the rule with the given id.
    pub fn without(mut self, id: &str) -> Self {
        self.rules.retain(|rule| rule.id() != id);
        self
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id())
    }

    pub fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut out = DiagnosticCollector::new(ctx.document);
        for rule in &self.rules {
            rule.check(ctx, &mut out);
        }
        tracing::trace!(
            document = %ctx.document,
            diagnostics = out.diagnostics().len(),
            "validated"
        );
        out.finish()
    }
}
