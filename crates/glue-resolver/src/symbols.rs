//! Host symbol table contract
//!
//! The engine never owns the host's model of types and members. It talks to
//! it through [`SymbolTable`], a read-only query interface keyed by opaque
//! [`SymbolId`] handles, and snapshots what it needs into [`ResolvedSymbol`]
//! values for validation, diagnostics and the resolved model.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// HANDLES & KINDS
// =============================================================================

/// Opaque handle into a host symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn from_raw(raw: u32) -> Self {
        SymbolId(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural kind of a host symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Namespace,
    Type,
    Method,
    Field,
}

impl SymbolKind {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Type => "type",
            SymbolKind::Method => "method",
            SymbolKind::Field => "field",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MODIFIERS
// =============================================================================

/// Declaration modifier reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
}

/// Set of modifiers on a symbol, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(SmallVec<[Modifier; 4]>);

impl Modifiers {
    pub fn new() -> Self {
        Modifiers(SmallVec::new())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Add a modifier, ignoring duplicates
    pub fn insert(&mut self, modifier: Modifier) {
        if !self.contains(modifier) {
            self.0.push(modifier);
        }
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn without(mut self, modifier: Modifier) -> Self {
        self.0.retain(|m| *m != modifier);
        self
    }

    pub fn is_public(&self) -> bool {
        self.contains(Modifier::Public)
    }

    pub fn is_private(&self) -> bool {
        self.contains(Modifier::Private)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    pub fn is_abstract(&self) -> bool {
        self.contains(Modifier::Abstract)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut modifiers = Modifiers::new();
        for modifier in iter {
            modifiers.insert(modifier);
        }
        modifiers
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(value: [Modifier; N]) -> Self {
        value.into_iter().collect()
    }
}

// =============================================================================
// SYMBOL TABLE ADAPTER
// =============================================================================

/// Everything the host knows about one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    pub name: Arc<str>,
    pub qualified_name: Arc<str>,
    pub modifiers: Modifiers,
    pub enclosing: Option<SymbolId>,
}

/// Read-only query interface over a host's types, methods and fields.
///
/// Member enumerations are ordered; the engine preserves that order in
/// everything it produces. Implementations used from several resolution
/// passes at once must tolerate concurrent `&self` queries.
pub trait SymbolTable {
    /// Look up a type by fully-qualified name (`pkg.Outer.Inner`).
    fn find_type(&self, qualified_name: &str) -> Option<SymbolId>;

    /// Members declared directly on `ty`, excluding inherited ones.
    fn direct_members(&self, ty: SymbolId) -> Vec<SymbolId>;

    /// Members declared on `ty` or inherited from its supertypes.
    fn all_members(&self, ty: SymbolId) -> Vec<SymbolId>;

    /// Describe a handle previously returned by this table.
    fn describe(&self, symbol: SymbolId) -> Option<SymbolInfo>;

    fn kind(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.describe(symbol).map(|info| info.kind)
    }

    fn modifiers(&self, symbol: SymbolId) -> Modifiers {
        self.describe(symbol)
            .map(|info| info.modifiers)
            .unwrap_or_default()
    }

    fn enclosing_scope(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.describe(symbol).and_then(|info| info.enclosing)
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn find_type(&self, qualified_name: &str) -> Option<SymbolId> {
        (**self).find_type(qualified_name)
    }

    fn direct_members(&self, ty: SymbolId) -> Vec<SymbolId> {
        (**self).direct_members(ty)
    }

    fn all_members(&self, ty: SymbolId) -> Vec<SymbolId> {
        (**self).all_members(ty)
    }

    fn describe(&self, symbol: SymbolId) -> Option<SymbolInfo> {
        (**self).describe(symbol)
    }
}

/// Walk outward from `symbol` to the first enclosing namespace.
pub fn containing_namespace<T: SymbolTable + ?Sized>(
    table: &T,
    symbol: SymbolId,
) -> Option<SymbolId> {
    let mut current = table.enclosing_scope(symbol)?;
    loop {
        if table.kind(current)? == SymbolKind::Namespace {
            return Some(current);
        }
        current = table.enclosing_scope(current)?;
    }
}

/// Qualified name of the containing namespace, or `""` when there is none.
pub fn containing_namespace_name<T: SymbolTable + ?Sized>(table: &T, symbol: SymbolId) -> Arc<str> {
    containing_namespace(table, symbol)
        .and_then(|ns| table.describe(ns))
        .map_or_else(|| Arc::from(""), |info| info.qualified_name)
}

// =============================================================================
// RESOLVED SYMBOL
// =============================================================================

/// Snapshot of a host symbol taken during a resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedSymbol {
    id: SymbolId,
    kind: SymbolKind,
    name: Arc<str>,
    qualified_name: Arc<str>,
    modifiers: Modifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    enclosing: Option<SymbolId>,
    namespace: Arc<str>,
}

impl ResolvedSymbol {
    /// Snapshot `id` from `table`. `None` when the table cannot describe it.
    pub fn capture<T: SymbolTable + ?Sized>(table: &T, id: SymbolId) -> Option<Self> {
        let info = table.describe(id)?;
        Some(ResolvedSymbol {
            id,
            kind: info.kind,
            name: info.name,
            qualified_name: info.qualified_name,
            modifiers: info.modifiers,
            enclosing: info.enclosing,
            namespace: containing_namespace_name(table, id),
        })
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Simple name, e.g. `Z` for field `com.x.Y#Z`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn enclosing(&self) -> Option<SymbolId> {
        self.enclosing
    }

    /// Qualified name of the namespace the symbol lives in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::SymbolUniverse;

    #[test]
    fn test_modifiers_ignore_duplicates() {
        let modifiers: Modifiers = [Modifier::Public, Modifier::Static, Modifier::Public].into();
        assert_eq!(modifiers.iter().count(), 2);
        assert!(modifiers.is_public());
        assert!(modifiers.is_static());
        assert!(!modifiers.is_final());
        assert!(!modifiers.clone().without(Modifier::Static).is_static());
    }

    #[test]
    fn test_containing_namespace_of_nested_member() {
        let mut universe = SymbolUniverse::new();
        let ns = universe.add_namespace("com.x");
        let outer = universe.add_type(ns, "Outer", Modifiers::from([Modifier::Public]));
        let inner = universe.add_type(outer, "Inner", Modifiers::from([Modifier::Public]));
        let field = universe.add_field(inner, "VALUE", Modifiers::new());

        assert_eq!(containing_namespace(&universe, field), Some(ns));
        assert_eq!(containing_namespace_name(&universe, field).as_ref(), "com.x");
        assert_eq!(containing_namespace(&universe, ns), None);
        assert_eq!(containing_namespace_name(&universe, ns).as_ref(), "");
    }

    #[test]
    fn test_capture_snapshots_metadata() {
        let mut universe = SymbolUniverse::new();
        let ns = universe.add_namespace("com.x");
        let ty = universe.add_type(ns, "Y", Modifiers::from([Modifier::Public]));
        let field = universe.add_field(
            ty,
            "Z",
            Modifiers::from([Modifier::Public, Modifier::Static, Modifier::Final]),
        );

        let Some(symbol) = ResolvedSymbol::capture(&universe, field) else {
            panic!("field should be describable");
        };
        assert_eq!(symbol.kind(), SymbolKind::Field);
        assert_eq!(symbol.name(), "Z");
        assert_eq!(symbol.qualified_name(), "com.x.Y#Z");
        assert_eq!(symbol.enclosing(), Some(ty));
        assert_eq!(symbol.namespace(), "com.x");
        assert!(symbol.modifiers().is_final());
        assert_eq!(symbol.to_string(), "field com.x.Y#Z");
    }

    #[test]
    fn test_capture_of_unknown_handle_is_none() {
        let universe = SymbolUniverse::new();
        assert!(ResolvedSymbol::capture(&universe, SymbolId::from_raw(42)).is_none());
    }
}
