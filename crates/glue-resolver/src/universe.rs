//! In-memory symbol table
//!
//! `SymbolUniverse` implements [`SymbolTable`] over an explicit list of
//! namespaces, types and members. It can be built programmatically or loaded
//! from a JSON description of a host's types, which is what the CLI does.
//!
//! Qualified names follow the manifest identifier syntax: nested types are
//! `pkg.Outer.Inner`, methods `pkg.Type::name`, fields `pkg.Type#name`.
//!
//! Member enumeration order is declaration order. `all_members` lists a type's
//! own members first, then each supertype's (depth-first, in declaration
//! order). A member is hidden when one with the same name and kind was already
//! listed, and an abstract method is hidden whenever a concrete method of the
//! same name exists anywhere in the type's supertype closure, regardless of
//! the order supertypes are declared in.

use crate::errors::UniverseError;
use crate::symbols::{Modifiers, SymbolId, SymbolInfo, SymbolKind, SymbolTable};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// DOCUMENT - JSON description of a host
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseDocument {
    #[serde(default)]
    pub namespaces: Vec<NamespaceDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Fully-qualified names of direct supertypes
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberDecl {
    Method(LeafDecl),
    Field(LeafDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

// =============================================================================
// UNIVERSE
// =============================================================================

#[derive(Debug)]
struct Entry {
    info: SymbolInfo,
    members: Vec<SymbolId>,
    supertypes: Vec<SymbolId>,
}

#[derive(Debug, Default)]
pub struct SymbolUniverse {
    entries: Vec<Entry>,
    types: AHashMap<Arc<str>, SymbolId>,
    namespaces: AHashMap<Arc<str>, SymbolId>,
}

impl SymbolUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a universe description from a JSON file
    pub fn load_from_path(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let universe = Self::from_json_str(&content)?;
        debug!(
            "Loaded symbol universe {} ({} symbols)",
            path.display(),
            universe.len()
        );
        Ok(universe)
    }

    pub fn from_json_str(content: &str) -> Result<Self, UniverseError> {
        let document: UniverseDocument = serde_json::from_str(content)?;
        Self::from_document(&document)
    }

    pub fn from_document(document: &UniverseDocument) -> Result<Self, UniverseError> {
        let mut universe = Self::new();
        let mut pending = Vec::new();

        for namespace in &document.namespaces {
            let ns = universe.add_namespace(&namespace.name);
            for decl in &namespace.types {
                universe.declare_type(ns, decl, &mut pending)?;
            }
        }

        // Supertypes may be declared anywhere in the document.
        for (ty, names) in pending {
            for name in names {
                let Some(supertype) = universe.find_type(&name) else {
                    return Err(UniverseError::UnknownSupertype {
                        ty: universe.entries[ty.index()].info.qualified_name.to_string(),
                        supertype: name,
                    });
                };
                universe.add_supertype(ty, supertype);
            }
        }

        Ok(universe)
    }

    fn declare_type(
        &mut self,
        scope: SymbolId,
        decl: &TypeDecl,
        pending: &mut Vec<(SymbolId, Vec<String>)>,
    ) -> Result<SymbolId, UniverseError> {
        let qualified = self.child_name(scope, &decl.name, SymbolKind::Type);
        if self.types.contains_key(qualified.as_str()) {
            return Err(UniverseError::DuplicateType(qualified));
        }

        let ty = self.add_type(scope, &decl.name, decl.modifiers.clone());
        if !decl.supertypes.is_empty() {
            pending.push((ty, decl.supertypes.clone()));
        }

        for member in &decl.members {
            match member {
                MemberDecl::Method(leaf) => {
                    self.add_method(ty, &leaf.name, leaf.modifiers.clone());
                }
                MemberDecl::Field(leaf) => {
                    self.add_field(ty, &leaf.name, leaf.modifiers.clone());
                }
                MemberDecl::Type(nested) => {
                    self.declare_type(ty, nested, pending)?;
                }
            }
        }

        Ok(ty)
    }

    /// Get or create a namespace
    pub fn add_namespace(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.namespaces.get(name) {
            return id;
        }
        let name: Arc<str> = Arc::from(name);
        let id = self.push(SymbolInfo {
            kind: SymbolKind::Namespace,
            name: name.clone(),
            qualified_name: name.clone(),
            modifiers: Modifiers::new(),
            enclosing: None,
        });
        self.namespaces.insert(name, id);
        id
    }

    /// Declare a type inside a namespace or, nested, inside another type.
    /// A later type with the same qualified name shadows the earlier one in
    /// `find_type`.
    pub fn add_type(&mut self, scope: SymbolId, name: &str, modifiers: Modifiers) -> SymbolId {
        let qualified: Arc<str> = Arc::from(self.child_name(scope, name, SymbolKind::Type));
        let id = self.push_member(scope, SymbolKind::Type, name, qualified.clone(), modifiers);
        self.types.insert(qualified, id);
        id
    }

    pub fn add_method(&mut self, owner: SymbolId, name: &str, modifiers: Modifiers) -> SymbolId {
        let qualified = Arc::from(self.child_name(owner, name, SymbolKind::Method));
        self.push_member(owner, SymbolKind::Method, name, qualified, modifiers)
    }

    pub fn add_field(&mut self, owner: SymbolId, name: &str, modifiers: Modifiers) -> SymbolId {
        let qualified = Arc::from(self.child_name(owner, name, SymbolKind::Field));
        self.push_member(owner, SymbolKind::Field, name, qualified, modifiers)
    }

    pub fn add_supertype(&mut self, ty: SymbolId, supertype: SymbolId) {
        if let Some(entry) = self.entries.get_mut(ty.index()) {
            if !entry.supertypes.contains(&supertype) {
                entry.supertypes.push(supertype);
            }
        }
    }

    /// Number of symbols, namespaces included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, info: SymbolInfo) -> SymbolId {
        let id = SymbolId::from_raw(self.entries.len() as u32);
        self.entries.push(Entry {
            info,
            members: Vec::new(),
            supertypes: Vec::new(),
        });
        id
    }

    fn push_member(
        &mut self,
        scope: SymbolId,
        kind: SymbolKind,
        name: &str,
        qualified_name: Arc<str>,
        modifiers: Modifiers,
    ) -> SymbolId {
        let id = self.push(SymbolInfo {
            kind,
            name: Arc::from(name),
            qualified_name,
            modifiers,
            enclosing: Some(scope),
        });
        if let Some(owner) = self.entries.get_mut(scope.index()) {
            if owner.info.kind == SymbolKind::Type {
                owner.members.push(id);
            }
        }
        id
    }

    fn child_name(&self, scope: SymbolId, name: &str, kind: SymbolKind) -> String {
        let Some(parent) = self.entries.get(scope.index()) else {
            return name.to_string();
        };
        let prefix = parent.info.qualified_name.as_ref();
        let separator = match kind {
            SymbolKind::Method => "::",
            SymbolKind::Field => "#",
            SymbolKind::Namespace | SymbolKind::Type => ".",
        };
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}{separator}{name}")
        }
    }

    /// Own members, then each supertype's, depth-first; each type visited once.
    fn collect_members(&self, ty: SymbolId, out: &mut Vec<SymbolId>, visited: &mut AHashSet<SymbolId>) {
        if !visited.insert(ty) {
            return;
        }
        let Some(entry) = self.entries.get(ty.index()) else {
            return;
        };
        out.extend(entry.members.iter().copied());
        for &supertype in &entry.supertypes {
            self.collect_members(supertype, out, visited);
        }
    }
}

impl SymbolTable for SymbolUniverse {
    fn find_type(&self, qualified_name: &str) -> Option<SymbolId> {
        self.types.get(qualified_name).copied()
    }

    fn direct_members(&self, ty: SymbolId) -> Vec<SymbolId> {
        self.entries
            .get(ty.index())
            .map(|entry| entry.members.clone())
            .unwrap_or_default()
    }

    fn all_members(&self, ty: SymbolId) -> Vec<SymbolId> {
        let mut candidates = Vec::new();
        self.collect_members(ty, &mut candidates, &mut AHashSet::new());

        let members: Vec<(SymbolId, &SymbolInfo)> = candidates
            .into_iter()
            .filter_map(|id| self.entries.get(id.index()).map(|entry| (id, &entry.info)))
            .collect();
        let implemented: AHashSet<&str> = members
            .iter()
            .filter(|(_, info)| info.kind == SymbolKind::Method && !info.modifiers.is_abstract())
            .map(|(_, info)| info.name.as_ref())
            .collect();

        let mut listed: AHashSet<(&str, SymbolKind)> = AHashSet::new();
        members
            .iter()
            .filter(|(_, info)| {
                let overridden_abstract = info.kind == SymbolKind::Method
                    && info.modifiers.is_abstract()
                    && implemented.contains(info.name.as_ref());
                !overridden_abstract && listed.insert((info.name.as_ref(), info.kind))
            })
            .map(|(id, _)| *id)
            .collect()
    }

    fn describe(&self, symbol: SymbolId) -> Option<SymbolInfo> {
        self.entries.get(symbol.index()).map(|entry| entry.info.clone())
    }
}
