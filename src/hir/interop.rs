//! Java interop: resolving Java class and member names.
//!
//! The class catalog (a classpath scanner, a prebuilt JSON dump, a test
//! fixture) is behind [`ClassCatalog`]. [`JavaInteropResolver`] caches every
//! answer, negative ones included, keyed by qualified name. The cache is only
//! dropped by an explicit [`JavaInteropResolver::reload`]; a generation
//! counter keeps a lookup that raced a reload from caching a stale answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::names::is_java_qualified_name;
use super::symbols::{Symbol, SymbolKind, SymbolOrigin, Visibility};

/// Descriptor of a Java class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JavaClass {
    pub qualified_name: SmolStr,
    pub fields: Vec<SmolStr>,
    pub methods: Vec<SmolStr>,
}

impl JavaClass {
    pub fn new(qualified_name: impl Into<SmolStr>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<SmolStr>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn with_method(mut self, name: impl Into<SmolStr>) -> Self {
        self.methods.push(name.into());
        self
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.fields.iter().chain(&self.methods).any(|m| m == name)
    }
}

/// Source of Java class descriptors.
pub trait ClassCatalog: Send + Sync {
    fn resolve_class(&self, qualified_name: &str) -> Option<JavaClass>;
}

/// A fixed, in-memory catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    classes: FxHashMap<SmolStr, JavaClass>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: JavaClass) -> Self {
        self.insert(class);
        self
    }

    pub fn insert(&mut self, class: JavaClass) {
        self.classes.insert(class.qualified_name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassCatalog for StaticCatalog {
    fn resolve_class(&self, qualified_name: &str) -> Option<JavaClass> {
        self.classes.get(qualified_name).cloned()
    }
}

/// Outcome of an interop lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteropResolution {
    Found(Symbol),
    NotFound,
}

impl InteropResolution {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            InteropResolution::Found(symbol) => Some(symbol),
            InteropResolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, InteropResolution::Found(_))
    }
}

/// Caching resolver over a [`ClassCatalog`].
pub struct JavaInteropResolver {
    catalog: RwLock<Arc<dyn ClassCatalog>>,
    cache: RwLock<FxHashMap<SmolStr, InteropResolution>>,
    generation: AtomicU64,
    catalog_queries: AtomicUsize,
}

impl std::fmt::Debug for JavaInteropResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaInteropResolver")
            .field("cached", &self.cache.read().len())
            .field("generation", &self.generation.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl Default for JavaInteropResolver {
    fn default() -> Self {
        Self::new(Arc::new(StaticCatalog::new()))
    }
}

impl JavaInteropResolver {
    pub fn new(catalog: Arc<dyn ClassCatalog>) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            cache: RwLock::new(FxHashMap::default()),
            generation: AtomicU64::new(0),
            catalog_queries: AtomicUsize::new(0),
        }
    }

    /// Resolves a qualified class name, or `Owner.member` to a member symbol.
    pub fn resolve(&self, qualified_name: &str) -> InteropResolution {
        if let Some(cached) = self.cache.read().get(qualified_name) {
            return cached.clone();
        }

        let generation = self.generation.load(Ordering::Acquire);
        let resolution = self.query(qualified_name);
        tracing::trace!(
            name = qualified_name,
            found = resolution.is_found(),
            "interop catalog lookup"
        );

        let mut cache = self.cache.write();
        if self.generation.load(Ordering::Acquire) == generation {
            cache
                .entry(SmolStr::new(qualified_name))
                .or_insert_with(|| resolution.clone());
        }
        resolution
    }

    fn query(&self, qualified_name: &str) -> InteropResolution {
        if !is_java_qualified_name(qualified_name) {
            return InteropResolution::NotFound;
        }
        let catalog = Arc::clone(&self.catalog.read());

        self.catalog_queries.fetch_add(1, Ordering::Relaxed);
        if let Some(class) = catalog.resolve_class(qualified_name) {
            return InteropResolution::Found(class_symbol(&class));
        }

        let Some((owner, member)) = qualified_name.rsplit_once('.') else {
            return InteropResolution::NotFound;
        };
        if !owner.contains('.') {
            return InteropResolution::NotFound;
        }
        self.catalog_queries.fetch_add(1, Ordering::Relaxed);
        match catalog.resolve_class(owner) {
            Some(class) if class.has_member(member) => {
                InteropResolution::Found(member_symbol(&class, member))
            }
            _ => InteropResolution::NotFound,
        }
    }

    /// Drops every cached answer. Lookups issued after this returns see the
    /// current catalog.
    pub fn reload(&self) {
        let mut cache = self.cache.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        cache.clear();
        tracing::debug!("interop cache cleared");
    }

    /// Swaps the catalog and clears the cache.
    pub fn replace_catalog(&self, catalog: Arc<dyn ClassCatalog>) {
        *self.catalog.write() = catalog;
        self.reload();
    }

    /// Number of catalog queries issued so far.
    pub fn catalog_queries(&self) -> usize {
        self.catalog_queries.load(Ordering::Relaxed)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }
}

fn external_symbol(name: &str, kind: SymbolKind, qualified_name: SmolStr) -> Symbol {
    Symbol {
        name: SmolStr::new(name),
        kind,
        visibility: Visibility::Exported,
        origin: SymbolOrigin::External { qualified_name },
        range: TextRange::default(),
        detail: None,
    }
}

fn class_symbol(class: &JavaClass) -> Symbol {
    let simple = class
        .qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(&class.qualified_name);
    external_symbol(simple, SymbolKind::ExternalClass, class.qualified_name.clone())
}

fn member_symbol(class: &JavaClass, member: &str) -> Symbol {
    let qualified = SmolStr::from(format!("{}.{member}", class.qualified_name));
    external_symbol(member, SymbolKind::ExternalMember, qualified)
        .with_detail(class.qualified_name.clone())
}
