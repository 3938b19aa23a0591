//! Reference linking inside one document.

use bbj::hir::{SymbolKind, codes};

use crate::helpers::builder_helpers::build_source;
use crate::helpers::diagnostic_helpers::*;
use crate::helpers::source_fixtures::LIST_CLASS;

#[test]
fn test_class_with_fields_and_constructor_call() {
    assert_no_diagnostics(LIST_CLASS);
}

#[test]
fn test_every_list_reference_binds_to_the_class() {
    let (builder, id) = build_source(LIST_CLASS);
    let links = builder.links(id).cloned().unwrap_or_default();
    assert!(links.unresolved.is_empty(), "{:?}", links.unresolved);
    let classes: Vec<_> = links
        .bindings
        .values()
        .filter(|s| s.kind == SymbolKind::Class)
        .collect();
    assert!(!classes.is_empty());
    assert!(classes.iter().all(|s| s.name == "List" && s.document() == Some(id)));
}

#[test]
fn test_field_references_bind_to_fields() {
    let (builder, id) = build_source(LIST_CLASS);
    let links = builder.links(id).cloned().unwrap_or_default();
    let fields = links
        .bindings
        .values()
        .filter(|s| s.kind == SymbolKind::Field)
        .count();
    assert_eq!(fields, 2);
}

#[test]
fn test_unknown_class_is_reported() {
    let diagnostics = diagnostics_for("declare Missing m!\n");
    assert_eq!(codes_of(&diagnostics), vec![codes::UNRESOLVED_REFERENCE]);
    assert_eq!(
        &*diagnostics[0].message,
        "Could not resolve reference to class named 'Missing'."
    );
}

#[test]
fn test_undeclared_variables_are_silent() {
    assert_no_diagnostics("x = y + 1\nprint z$\n");
}

#[test]
fn test_java_use_statements() {
    assert_no_diagnostics("use java.util.HashMap\nm! = new HashMap()\n");
    let diagnostics = diagnostics_for("use java.util.Missing\n");
    assert_eq!(codes_of(&diagnostics), vec![codes::INTEROP_NOT_FOUND]);
}

#[test]
fn test_implicit_java_lang() {
    assert_no_diagnostics("declare String s!\n");
}

#[test]
fn test_unresolved_field_in_subclass_is_silent() {
    assert_no_diagnostics(
        "class public Child extends Parent\n  method public void m()\n    #inherited = 1\n  methodend\nclassend\nclass public Parent\nclassend\n",
    );
}
