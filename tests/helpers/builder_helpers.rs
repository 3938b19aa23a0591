//! Builders preloaded with sources and a small Java catalog.

use std::sync::Arc;

use bbj::hir::{ClassCatalog, JavaClass, StaticCatalog};
use bbj::project::{BuilderServices, DocumentBuilder, EngineConfig};
use bbj::DocumentId;
use once_cell::sync::Lazy;

/// The Java classes every test workspace can see.
pub static CATALOG: Lazy<Arc<StaticCatalog>> = Lazy::new(|| {
    Arc::new(
        StaticCatalog::new()
            .with_class(JavaClass::new("java.lang.String").with_method("length"))
            .with_class(JavaClass::new("java.lang.System").with_field("out"))
            .with_class(
                JavaClass::new("java.util.HashMap")
                    .with_method("put")
                    .with_method("get"),
            )
            .with_class(JavaClass::new("java.util.ArrayList").with_method("add")),
    )
});

pub fn catalog() -> Arc<dyn ClassCatalog> {
    let catalog: Arc<StaticCatalog> = Arc::clone(&CATALOG);
    catalog
}

pub fn builder() -> DocumentBuilder {
    builder_with_config(EngineConfig::default())
}

pub fn builder_with_config(config: EngineConfig) -> DocumentBuilder {
    let services = BuilderServices::from_config(&config, catalog());
    DocumentBuilder::new(config, services)
}

/// Opens every `(uri, text)` pair and builds them in one batch.
pub fn build_sources(files: &[(&str, &str)]) -> (DocumentBuilder, Vec<DocumentId>) {
    let mut builder = builder();
    let ids: Vec<_> = files
        .iter()
        .map(|(uri, text)| builder.open_document(*uri, *text))
        .collect();
    let report = builder.rebuild(&ids);
    assert!(report.failed.is_empty(), "build failed: {:?}", report.failed);
    (builder, ids)
}

pub fn build_source(text: &str) -> (DocumentBuilder, DocumentId) {
    let (builder, ids) = build_sources(&[("file:///test.bbj", text)]);
    (builder, ids[0])
}
