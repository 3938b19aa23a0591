//! Diagnostic assertion helpers.

use bbj::hir::Diagnostic;

use crate::helpers::builder_helpers::build_source;

/// Diagnostics of a single document built on its own.
pub fn diagnostics_for(text: &str) -> Vec<Diagnostic> {
    let (builder, id) = build_source(text);
    builder.diagnostics(id).unwrap_or_default().to_vec()
}

pub fn codes_of(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().filter_map(|d| d.code).collect()
}

pub fn assert_no_diagnostics(text: &str) {
    let diagnostics = diagnostics_for(text);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        diagnostics.len(),
        render(&diagnostics)
    );
}

pub fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {:?} {}: {}", d.range, d.code.unwrap_or("-"), d.message))
        .collect::<Vec<_>>()
        .join("\n")
}
