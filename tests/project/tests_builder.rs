//! DocumentBuilder: cross-document linking, invalidation and failure handling.

use bbj::hir::{SymbolKind, codes};
use bbj::project::{BuildError, EngineConfig};
use bbj::DocumentId;

use crate::helpers::builder_helpers::*;
use crate::helpers::diagnostic_helpers::{codes_of, render};
use crate::helpers::source_fixtures::*;

const HELPER_LIB: &str = "class public Helper\nclassend\n";
const HELPER_USER: &str = "declare Helper h!\n";

fn diagnostics_of(builder: &bbj::DocumentBuilder, id: DocumentId) -> Vec<bbj::Diagnostic> {
    builder.diagnostics(id).unwrap_or_default().to_vec()
}

fn bound_documents(builder: &bbj::DocumentBuilder, id: DocumentId) -> Vec<DocumentId> {
    builder
        .links(id)
        .map(|links| links.bound_documents.iter().copied().collect())
        .unwrap_or_default()
}

// =============================================================================
// CROSS-DOCUMENT LINKING
// =============================================================================

#[test]
fn test_class_from_another_document() {
    let (builder, ids) = build_sources(&[
        ("file:///lib.bbj", HELPER_LIB),
        ("file:///main.bbj", HELPER_USER),
    ]);
    assert!(diagnostics_of(&builder, ids[1]).is_empty());
    assert_eq!(bound_documents(&builder, ids[1]), vec![ids[0]]);
}

#[test]
fn test_use_statement_picks_the_named_file() {
    let (builder, ids) = build_sources(&[
        ("file:///shared/util.bbj", SHARED_LIB),
        ("file:///lib.bbj", SHARED_LIB),
        ("file:///main.bbj", SHARED_USER),
    ]);
    let main = ids[2];
    assert!(
        diagnostics_of(&builder, main).is_empty(),
        "{}",
        render(&diagnostics_of(&builder, main))
    );
    assert_eq!(bound_documents(&builder, main), vec![ids[1]]);
}

#[test]
fn test_same_class_in_two_documents_is_ambiguous() {
    let (builder, ids) = build_sources(&[
        ("file:///lib1.bbj", HELPER_LIB),
        ("file:///lib2.bbj", HELPER_LIB),
        ("file:///main.bbj", HELPER_USER),
    ]);
    let diagnostics = diagnostics_of(&builder, ids[2]);
    assert_eq!(codes_of(&diagnostics), vec![codes::AMBIGUOUS_REFERENCE]);
    assert!(diagnostics[0].message.contains("file:///lib1.bbj"));
    assert!(diagnostics[0].message.contains("file:///lib2.bbj"));
    let links = builder.links(ids[2]).cloned().unwrap_or_default();
    assert!(links.bindings.is_empty());
    assert_eq!(links.ambiguous.values().next().map(Vec::len), Some(2));
}

#[test]
fn test_duplicate_exports_in_one_document_are_not_ambiguous() {
    let (builder, ids) = build_sources(&[
        (
            "file:///lib.bbj",
            "class public Helper\nclassend\nclass public Helper\nclassend\n",
        ),
        ("file:///main.bbj", HELPER_USER),
    ]);
    let diagnostics = diagnostics_of(&builder, ids[1]);
    assert!(diagnostics.is_empty(), "{}", render(&diagnostics));
    assert_eq!(bound_documents(&builder, ids[1]), vec![ids[0]]);
    assert_eq!(builder.lookup_workspace_symbol("Helper").len(), 2);
}

#[test]
fn test_local_class_shadows_workspace() {
    let (builder, ids) = build_sources(&[
        ("file:///lib.bbj", HELPER_LIB),
        ("file:///main.bbj", "class public Helper\nclassend\ndeclare Helper h!\n"),
    ]);
    assert!(diagnostics_of(&builder, ids[1]).is_empty());
    assert!(bound_documents(&builder, ids[1]).is_empty());
}

#[test]
fn test_labels_never_cross_documents() {
    let (builder, ids) = build_sources(&[
        ("file:///lib.bbj", "shared:\nreturn\n"),
        ("file:///main.bbj", "goto shared\n"),
    ]);
    assert_eq!(
        codes_of(&diagnostics_of(&builder, ids[1])),
        vec![codes::UNDEFINED_LABEL]
    );
}

// =============================================================================
// INVALIDATION
// =============================================================================

#[test]
fn test_removing_a_document_unbinds_dependents() {
    let (mut builder, ids) = build_sources(&[
        ("file:///lib.bbj", HELPER_LIB),
        ("file:///main.bbj", HELPER_USER),
    ]);
    let report = builder.remove_document(ids[0]);
    assert_eq!(report.map(|r| r.relinked), Ok(vec![ids[1]]));
    let diagnostics = diagnostics_of(&builder, ids[1]);
    assert_eq!(codes_of(&diagnostics), vec![codes::UNRESOLVED_REFERENCE]);
    assert!(builder.lookup_workspace_symbol("Helper").is_empty());
    assert_eq!(builder.diagnostics(ids[0]), None);
}

#[test]
fn test_adding_a_document_resolves_dependents() {
    let (mut builder, ids) = build_sources(&[("file:///main.bbj", HELPER_USER)]);
    assert_eq!(
        codes_of(&diagnostics_of(&builder, ids[0])),
        vec![codes::UNRESOLVED_REFERENCE]
    );
    let lib = builder.open_document("file:///lib.bbj", HELPER_LIB);
    let report = builder.rebuild(&[lib]);
    assert!(report.relinked.contains(&ids[0]));
    assert!(diagnostics_of(&builder, ids[0]).is_empty());
}

#[test]
fn test_unrelated_edit_leaves_bindings_alone() {
    let (mut builder, ids) = build_sources(&[
        ("file:///lib.bbj", HELPER_LIB),
        ("file:///other.bbj", "class public Other\nclassend\n"),
        ("file:///main.bbj", HELPER_USER),
    ]);
    let before = builder.links(ids[2]).cloned();

    builder.open_document("file:///other.bbj", "class public Other2\nclassend\n");
    let report = builder.rebuild(&[ids[1]]);
    assert_eq!(report.relinked, vec![ids[1]]);
    assert_eq!(builder.links(ids[2]).cloned(), before);
}

#[test]
fn test_rebuild_is_idempotent() {
    let (mut builder, ids) = build_sources(&[
        ("file:///lib1.bbj", HELPER_LIB),
        ("file:///lib2.bbj", HELPER_LIB),
        ("file:///main.bbj", "declare Helper h!\ngoto nowhere\nOPEN (1,bad=1)\"x\"\n"),
    ]);
    let first: Vec<_> = ids.iter().map(|id| diagnostics_of(&builder, *id)).collect();
    builder.rebuild_all();
    let second: Vec<_> = ids.iter().map(|id| diagnostics_of(&builder, *id)).collect();
    assert_eq!(first, second);
    assert_eq!(first[2].len(), 3, "{}", render(&first[2]));
}

// =============================================================================
// FAILURES AND CANCELLATION
// =============================================================================

#[test]
fn test_broken_document_keeps_serving_old_exports() {
    let (mut builder, ids) = build_sources(&[
        ("file:///lib.bbj", HELPER_LIB),
        ("file:///main.bbj", HELPER_USER),
    ]);
    builder.open_document("file:///lib.bbj", "class public Helper\n");
    let report = builder.rebuild(&[ids[0]]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].document(), ids[0]);
    assert!(matches!(report.failed[0], BuildError::ParseFailure { .. }));

    assert_eq!(builder.index().is_valid(ids[0]), Some(false));
    let symbols = builder.lookup_workspace_symbol("Helper");
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].kind, SymbolKind::Class);
    assert!(diagnostics_of(&builder, ids[1]).is_empty());
    assert!(codes_of(&diagnostics_of(&builder, ids[0]))
        .iter()
        .all(|code| *code == codes::SYNTAX_ERROR));
}

#[test]
fn test_fixing_a_broken_document_revalidates_it() {
    let (mut builder, ids) = build_sources(&[("file:///lib.bbj", HELPER_LIB)]);
    builder.open_document("file:///lib.bbj", "class public Helper\n");
    builder.rebuild(&[ids[0]]);
    builder.open_document("file:///lib.bbj", HELPER_LIB);
    assert!(builder.rebuild(&[ids[0]]).is_clean());
    assert_eq!(builder.index().is_valid(ids[0]), Some(true));
    assert!(diagnostics_of(&builder, ids[0]).is_empty());
}

#[test]
fn test_reopening_cancels_the_previous_build() {
    let mut builder = builder();
    let id = builder.open_document("file:///a.bbj", HELPER_LIB);
    let stale = builder.cancellation_token(id);
    builder.open_document("file:///a.bbj", "class public Renamed\nclassend\n");
    assert!(stale.is_some_and(|token| token.is_cancelled()));

    assert!(builder.rebuild(&[id]).is_clean());
    assert!(builder.lookup_workspace_symbol("Helper").is_empty());
    assert_eq!(builder.lookup_workspace_symbol("Renamed").len(), 1);
}

#[test]
fn test_cancelled_documents_are_skipped() {
    let mut builder = builder();
    let lib = builder.open_document("file:///lib.bbj", HELPER_LIB);
    let main = builder.open_document("file:///main.bbj", HELPER_USER);
    if let Some(token) = builder.cancellation_token(lib) {
        token.cancel();
    }
    let report = builder.rebuild(&[lib, main]);
    assert_eq!(report.cancelled, vec![lib]);
    assert!(!report.is_clean());
    assert_eq!(
        report.errors().collect::<Vec<_>>(),
        vec![BuildError::Cancelled(lib)]
    );
    assert_eq!(
        codes_of(&diagnostics_of(&builder, main)),
        vec![codes::UNRESOLVED_REFERENCE]
    );
}

#[test]
fn test_sequential_configuration() {
    let mut builder = builder_with_config(EngineConfig::default().with_parallel_scopes(false));
    let lib = builder.open_document("file:///lib.bbj", HELPER_LIB);
    let main = builder.open_document("file:///main.bbj", HELPER_USER);
    assert!(builder.rebuild(&[lib, main]).is_clean());
    assert!(diagnostics_of(&builder, main).is_empty());
}

#[test]
fn test_custom_rule_set() {
    let config = EngineConfig::default();
    let services = bbj::BuilderServices::from_config(&config, catalog())
        .with_validator(bbj::hir::ValidatorRuleSet::default().without("undefined-label"));
    let mut builder = bbj::DocumentBuilder::new(config, services);
    let id = builder.open_document("file:///main.bbj", "goto nowhere\n");
    assert!(builder.rebuild(&[id]).is_clean());
    assert_eq!(builder.diagnostics(id), Some([].as_slice()));
}
