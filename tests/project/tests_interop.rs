//! Java interop through the builder: catalog swaps and cache reloads.

use std::sync::Arc;

use bbj::hir::{JavaClass, StaticCatalog, SymbolKind, codes};
use bbj::project::{BuilderServices, DocumentBuilder, EngineConfig};

use crate::helpers::builder_helpers::catalog;
use crate::helpers::diagnostic_helpers::codes_of;

const USES_QUEUE: &str = "use java.util.ArrayDeque\nq! = new ArrayDeque()\n";

fn empty_catalog_builder(config: EngineConfig) -> DocumentBuilder {
    let services = BuilderServices::from_config(&config, Arc::new(StaticCatalog::new()));
    DocumentBuilder::new(config, services)
}

#[test]
fn test_replacing_the_catalog_resolves_missing_classes() {
    let mut builder = empty_catalog_builder(EngineConfig::default());
    let id = builder.open_document("file:///main.bbj", USES_QUEUE);
    builder.rebuild(&[id]);
    let before = builder.diagnostics(id).unwrap_or_default().to_vec();
    assert_eq!(codes_of(&before), vec![codes::INTEROP_NOT_FOUND]);
    assert_eq!(
        &*before[0].message,
        "Could not resolve Java class 'java.util.ArrayDeque'."
    );

    let catalog = StaticCatalog::new().with_class(JavaClass::new("java.util.ArrayDeque"));
    let report = builder.replace_catalog(Arc::new(catalog));
    assert_eq!(report.relinked, vec![id]);
    assert_eq!(builder.diagnostics(id), Some([].as_slice()));
}

#[test]
fn test_lookups_are_cached_until_reload() {
    let mut builder = DocumentBuilder::with_catalog(catalog());
    let a = builder.open_document("file:///a.bbj", "use java.util.HashMap\n");
    let b = builder.open_document("file:///b.bbj", "use java.util.HashMap\n");
    builder.rebuild(&[a, b]);
    let queries = builder.interop().catalog_queries();
    assert_eq!(queries, 1);

    builder.rebuild(&[a, b]);
    assert_eq!(builder.interop().catalog_queries(), queries);

    builder.reload_catalog();
    assert_eq!(builder.interop().catalog_queries(), queries + 1);
}

#[test]
fn test_interop_errors_can_be_disabled() {
    let config = EngineConfig::default().with_unresolved_interop(false);
    let mut builder = empty_catalog_builder(config);
    let id = builder.open_document("file:///main.bbj", USES_QUEUE);
    builder.rebuild(&[id]);
    assert_eq!(builder.diagnostics(id), Some([].as_slice()));
}

#[test]
fn test_qualified_type_binds_to_java_class() {
    let mut builder = DocumentBuilder::with_catalog(catalog());
    let id = builder.open_document("file:///main.bbj", "declare java.lang.System s!\n");
    builder.rebuild(&[id]);
    assert_eq!(builder.diagnostics(id), Some([].as_slice()));
    let kinds: Vec<_> = builder
        .links(id)
        .map(|links| links.bindings.values().map(|s| s.kind).collect())
        .unwrap_or_default();
    assert_eq!(kinds, vec![SymbolKind::ExternalClass]);
}
