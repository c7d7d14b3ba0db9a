//! Resolved manifest handed to code generation
//!
//! Values here are produced by the builder only. Once a pass finishes the
//! [`ResolvedManifest`] is read-only: entries are never removed, and entries
//! that failed resolution were never admitted.

use crate::symbols::ResolvedSymbol;
use glue_manifest::GlueableKind;
use serde::Serialize;
use std::sync::Arc;

/// An entity type that needs a generated factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlueModuleInfo {
    entity_type: ResolvedSymbol,
    factory_package: Arc<str>,
    factory_name: Arc<str>,
    unimplemented_members: Vec<ResolvedSymbol>,
}

impl GlueModuleInfo {
    pub(crate) fn new(
        entity_type: ResolvedSymbol,
        factory_package: Arc<str>,
        factory_name: Arc<str>,
        unimplemented_members: Vec<ResolvedSymbol>,
    ) -> Self {
        Self {
            entity_type,
            factory_package,
            factory_name,
            unimplemented_members,
        }
    }

    pub fn entity_type(&self) -> &ResolvedSymbol {
        &self.entity_type
    }

    pub fn factory_package(&self) -> &str {
        &self.factory_package
    }

    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// `package.Name`, or just `Name` in the unnamed package
    pub fn factory_qualified_name(&self) -> String {
        if self.factory_package.is_empty() {
            self.factory_name.to_string()
        } else {
            format!("{}.{}", self.factory_package, self.factory_name)
        }
    }

    /// Abstract methods the factory has to implement, in host order
    pub fn unimplemented_members(&self) -> &[ResolvedSymbol] {
        &self.unimplemented_members
    }
}

/// A symbol exposed to generated code under `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlueableInfo {
    kind: GlueableKind,
    symbol: ResolvedSymbol,
    key: Arc<str>,
    enabled: bool,
}

impl GlueableInfo {
    pub(crate) fn new(kind: GlueableKind, symbol: ResolvedSymbol, key: Arc<str>, enabled: bool) -> Self {
        Self {
            kind,
            symbol,
            key,
            enabled,
        }
    }

    pub fn kind(&self) -> GlueableKind {
        self.kind
    }

    pub fn symbol(&self) -> &ResolvedSymbol {
        &self.symbol
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Output of one or more resolution passes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedManifest {
    modules: Vec<GlueModuleInfo>,
    glueables: Vec<GlueableInfo>,
}

impl ResolvedManifest {
    pub(crate) fn push_module(&mut self, module: GlueModuleInfo) {
        self.modules.push(module);
    }

    pub(crate) fn push_glueable(&mut self, glueable: GlueableInfo) {
        self.glueables.push(glueable);
    }

    pub fn modules(&self) -> &[GlueModuleInfo] {
        &self.modules
    }

    pub fn glueables(&self) -> &[GlueableInfo] {
        &self.glueables
    }

    pub fn enabled_glueables(&self) -> impl Iterator<Item = &GlueableInfo> {
        self.glueables.iter().filter(|g| g.is_enabled())
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.glueables.is_empty()
    }

    /// Append the entries of a later pass after this one's
    pub fn merge(mut self, other: ResolvedManifest) -> Self {
        self.modules.extend(other.modules);
        self.glueables.extend(other.glueables);
        self
    }

    /// Serialize for consumers outside the process
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
