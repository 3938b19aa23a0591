//! Canonical names for declarations and references.

use smol_str::SmolStr;

use super::symbols::SymbolKind;

/// Computes the resolvable name of a declaration or reference.
///
/// Implementations must be pure: the same input always yields the same name,
/// and a declaration and a reference to it must normalize identically.
pub trait NameProvider: Send + Sync {
    /// Canonical name for an identifier declared or referenced as `kind`.
    fn canonical_name(&self, raw: &str, kind: SymbolKind) -> SmolStr;

    /// Canonical simple name of a dotted Java class name.
    fn simple_name<'a>(&self, qualified: &'a str) -> &'a str {
        qualified.rsplit('.').next().unwrap_or(qualified)
    }
}

/// BBj naming rules.
///
/// Labels are case-insensitive and stored lowercased. Every other name is
/// case-sensitive and keeps its type suffix (`$`, `%`, `!`), so `name` and
/// `name$` are different variables. A leading `#` marks a field access and
/// is not part of the name.
#[derive(Clone, Copy, Debug, Default)]
pub struct BbjNameProvider;

impl NameProvider for BbjNameProvider {
    fn canonical_name(&self, raw: &str, kind: SymbolKind) -> SmolStr {
        let raw = raw.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        match kind {
            SymbolKind::Label => SmolStr::from(raw.to_ascii_lowercase()),
            SymbolKind::ExternalClass => SmolStr::new(self.simple_name(raw)),
            _ => SmolStr::new(raw),
        }
    }
}

/// Returns true when every dot-separated segment is a Java identifier.
pub fn is_java_qualified_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_java_identifier)
}

fn is_java_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || first == '$' || unicode_ident::is_xid_start(first) => {}
        _ => return false,
    }
    chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}
