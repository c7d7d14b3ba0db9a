//! Raw manifest records as they appear in a dependency's glue config file
//!
//! These types carry plain strings only. Nothing here knows about the host
//! symbol table; turning identifiers into symbols is the resolver's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// MANIFEST - Top-level document
// =============================================================================

/// Top-level glue manifest: module entries and glueable entries, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "entities")]
    pub modules: Vec<ModuleEntry>,
    #[serde(default)]
    pub glueables: Vec<GlueableEntry>,
}

// =============================================================================
// MODULE ENTRY
// =============================================================================

/// Declares an abstract entity type that needs a generated factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    #[serde(rename = "entityClassName")]
    pub entity_type_name: Arc<str>,
    #[serde(rename = "factoryPackageName")]
    pub factory_package: Arc<str>,
    #[serde(rename = "factoryClassName")]
    pub factory_name: Arc<str>,
}

// =============================================================================
// GLUEABLE ENTRY
// =============================================================================

/// Declares a symbol that downstream generation may bind to `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlueableEntry {
    pub kind: GlueableKind,
    pub identifier: Arc<str>,
    pub key: Arc<str>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// What sort of symbol a glueable identifier points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlueableKind {
    StaticMethod,
    InstanceMethod,
    StaticField,
    Interface,
    AbstractClass,
    Class,
}

impl GlueableKind {
    pub const ALL: [GlueableKind; 6] = [
        GlueableKind::StaticMethod,
        GlueableKind::InstanceMethod,
        GlueableKind::StaticField,
        GlueableKind::Interface,
        GlueableKind::AbstractClass,
        GlueableKind::Class,
    ];

    /// Name as written in manifest files
    pub fn as_str(self) -> &'static str {
        match self {
            GlueableKind::StaticMethod => "STATIC_METHOD",
            GlueableKind::InstanceMethod => "INSTANCE_METHOD",
            GlueableKind::StaticField => "STATIC_FIELD",
            GlueableKind::Interface => "INTERFACE",
            GlueableKind::AbstractClass => "ABSTRACT_CLASS",
            GlueableKind::Class => "CLASS",
        }
    }

    /// Phrase used in diagnostics, e.g. "static method"
    pub fn describe(self) -> &'static str {
        match self {
            GlueableKind::StaticMethod => "static method",
            GlueableKind::InstanceMethod => "method",
            GlueableKind::StaticField => "static field",
            GlueableKind::Interface => "interface",
            GlueableKind::AbstractClass => "abstract class",
            GlueableKind::Class => "class",
        }
    }
}

impl fmt::Display for GlueableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// IMPL BLOCKS
// =============================================================================

impl Manifest {
    /// Total number of entries of both sorts
    pub fn entry_count(&self) -> usize {
        self.modules.len() + self.glueables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.glueables.is_empty()
    }
}

impl ModuleEntry {
    pub fn new(
        entity_type_name: impl Into<Arc<str>>,
        factory_package: impl Into<Arc<str>>,
        factory_name: impl Into<Arc<str>>,
    ) -> Self {
        ModuleEntry {
            entity_type_name: entity_type_name.into(),
            factory_package: factory_package.into(),
            factory_name: factory_name.into(),
        }
    }
}

impl GlueableEntry {
    pub fn new(kind: GlueableKind, identifier: impl Into<Arc<str>>, key: impl Into<Arc<str>>) -> Self {
        GlueableEntry {
            kind,
            identifier: identifier.into(),
            key: key.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
