//! Label rules: branch targets must exist, names must be unique per scope.

use super::{ValidationContext, ValidationRule};
use crate::hir::diagnostics::{DiagnosticCollector, RelatedInfo, codes};
use crate::hir::scope::ReferenceKind;
use crate::hir::symbols::SymbolKind;

/// Every `goto`/`gosub`/`seterr`/`setesc` target and `err=` branch must be
/// bound to a label of the same document.
#[derive(Clone, Copy, Debug, Default)]
pub struct UndefinedLabelRule;

impl ValidationRule for UndefinedLabelRule {
    fn id(&self) -> &'static str {
        "undefined-label"
    }

    fn check(&self, ctx: &ValidationContext<'_>, out: &mut DiagnosticCollector) {
        for site in ctx.references {
            if site.kind != ReferenceKind::Label {
                continue;
            }
            let defined = ctx.links.binding(site.node).is_some_and(|symbol| {
                symbol.kind == SymbolKind::Label && symbol.document() == Some(ctx.document)
            });
            if !defined {
                out.error(
                    site.node,
                    site.range,
                    codes::UNDEFINED_LABEL,
                    format!("Could not resolve reference to label named '{}'.", site.text),
                );
            }
        }
    }
}

/// A label declared twice in one scope; reported on every later declaration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DuplicateLabelRule;

impl ValidationRule for DuplicateLabelRule {
    fn id(&self) -> &'static str {
        "duplicate-label"
    }

    fn check(&self, ctx: &ValidationContext<'_>, out: &mut DiagnosticCollector) {
        let tree = ctx.scopes;
        for id in tree.scope_ids() {
            let scope = tree.scope(id);
            for name in scope.names() {
                let mut labels = scope
                    .lookup(name)
                    .iter()
                    .map(|id| tree.symbol(*id))
                    .filter(|symbol| symbol.kind == SymbolKind::Label);
                let Some(first) = labels.next() else {
                    continue;
                };
                for duplicate in labels {
                    let Some(node) = duplicate.node() else {
                        continue;
                    };
                    let diagnostic = out.error(
                        node,
                        duplicate.range,
                        codes::DUPLICATE_LABEL,
                        format!("Duplicate label '{name}'."),
                    );
                    diagnostic.related.push(RelatedInfo {
                        document: ctx.document,
                        range: first.range,
                        message: "first declared here".into(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hir::diagnostics::codes;
    use crate::hir::validation::test_support::validate;

    #[test]
    fn test_forward_labels_are_defined() {
        assert!(validate("goto later\ngosub later\nlater:\nreturn\n").is_empty());
    }

    #[test]
    fn test_undefined_goto_target() {
        let diagnostics = validate("goto nowhere\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::UNDEFINED_LABEL));
        assert_eq!(
            &*diagnostics[0].message,
            "Could not resolve reference to label named 'nowhere'."
        );
    }

    #[test]
    fn test_on_goto_checks_every_target() {
        let diagnostics = validate("on x goto first, second\nfirst:\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'second'"));
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        assert!(validate("GOTO Done\ndone:\n").is_empty());
    }

    #[test]
    fn test_undefined_err_branch() {
        let diagnostics = validate("open (1,err=handler)\"file\"\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::UNDEFINED_LABEL));
    }

    #[test]
    fn test_duplicate_label_reported_once() {
        let diagnostics = validate("start:\nprint 1\nStart:\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::DUPLICATE_LABEL));
        assert_eq!(&*diagnostics[0].message, "Duplicate label 'start'.");
        assert_eq!(diagnostics[0].related.len(), 1);
    }

    #[test]
    fn test_same_label_in_different_procedures() {
        let source = "def fna(x)\n  done:\n  return x\nfnend\ndef fnb(x)\n  done:\n  return x\nfnend\n";
        assert!(validate(source).is_empty());
    }
}
