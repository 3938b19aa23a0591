//! AnalysisHost: batched edits, goto-definition and symbol search.

use bbj::hir::{SymbolKind, codes};
use bbj::ide::AnalysisHost;
use bbj::project::EngineConfig;

use crate::helpers::builder_helpers::catalog;
use crate::helpers::source_fixtures::{LIST_CLASS, SHARED_LIB, SHARED_USER};

fn host() -> AnalysisHost {
    AnalysisHost::with_config(EngineConfig::default(), catalog())
}

#[test]
fn test_goto_class_in_another_file() {
    let mut host = host();
    host.set_file_content("file:///lib.bbj", SHARED_LIB);
    host.set_file_content("file:///main.bbj", SHARED_USER);
    let analysis = host.analysis();

    // `Shared` in `use ::lib.bbj::Shared`
    let result = analysis.goto_definition("file:///main.bbj", 0, 16);
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.name, "Shared");
    assert_eq!(target.uri.as_deref(), Some("file:///lib.bbj"));
    assert_eq!(target.start_line, 0);
}

#[test]
fn test_goto_forward_label() {
    let mut host = host();
    host.set_file_content("file:///main.bbj", "goto done\nprint 1\ndone:\n");
    let result = host.analysis().goto_definition("file:///main.bbj", 0, 6);
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].kind, SymbolKind::Label);
    assert_eq!(result.targets[0].start_line, 2);
}

#[test]
fn test_goto_java_class_has_no_location() {
    let mut host = host();
    host.set_file_content("file:///main.bbj", "use java.util.HashMap\n");
    let result = host.analysis().goto_definition("file:///main.bbj", 0, 10);
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.document, None);
    assert_eq!(target.qualified_name.as_deref(), Some("java.util.HashMap"));
}

#[test]
fn test_goto_outside_any_reference() {
    let mut host = host();
    host.set_file_content("file:///main.bbj", "print 1\n");
    assert!(host.analysis().goto_definition("file:///main.bbj", 0, 1).is_empty());
}

#[test]
fn test_symbol_search() {
    let mut host = host();
    host.set_file_content("file:///list.bbj", LIST_CLASS);
    host.set_file_content("file:///lib.bbj", SHARED_LIB);
    let analysis = host.analysis();

    let names: Vec<_> = analysis
        .workspace_symbols(Some("LIS"))
        .into_iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["List"]);

    let outline = analysis.document_symbols("file:///list.bbj");
    assert!(outline.iter().any(|s| s.name == "List" && s.kind == SymbolKind::Class));
    assert!(outline.iter().any(|s| s.name == "size" && s.kind == SymbolKind::Field));
    assert!(outline.iter().all(|s| s.kind != SymbolKind::Variable));
}

#[test]
fn test_edit_then_query() {
    let mut host = host();
    host.set_file_content("file:///lib.bbj", "class public Helper\nclassend\n");
    host.set_file_content("file:///main.bbj", "declare Helper h!\n");
    assert!(host.analysis().diagnostics("file:///main.bbj").is_empty());

    host.set_file_content("file:///lib.bbj", "class public Other\nclassend\n");
    assert!(host.is_dirty());
    let codes: Vec<_> = host
        .analysis()
        .diagnostics("file:///main.bbj")
        .iter()
        .filter_map(|d| d.code)
        .collect();
    assert_eq!(codes, vec![codes::UNRESOLVED_REFERENCE]);
    assert_eq!(host.file_count(), 2);
}
