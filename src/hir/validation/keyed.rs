//! `MODE=` is only meaningful when creating an MKEYED file.

use super::{ValidationContext, ValidationRule};
use crate::hir::diagnostics::{DiagnosticCollector, codes};
use crate::parser::{KeyedVerb, StatementKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyedModeRule;

impl ValidationRule for KeyedModeRule {
    fn id(&self) -> &'static str {
        "keyed-mode"
    }

    fn check(&self, ctx: &ValidationContext<'_>, out: &mut DiagnosticCollector) {
        ctx.file.for_each_statement(|statement| {
            let StatementKind::KeyedFile(keyed) = &statement.kind else {
                return;
            };
            if keyed.verb == KeyedVerb::Mkeyed {
                return;
            }
            for option in keyed.mode_options() {
                let diagnostic = out.error(
                    statement.id,
                    option.range,
                    codes::INVALID_OPTION_FOR_VERB,
                    "MODE option only supported in MKEYED Verb.",
                );
                diagnostic.property = Some("mode");
            }
        });
    }
}
