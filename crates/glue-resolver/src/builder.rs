//! Manifest model builder
//!
//! Every entry is resolved on its own. A failing entry becomes a notice and is
//! left out of the result; the pass carries on with the next entry, so one
//! stale dependency cannot block everything else. Only an unreadable manifest
//! aborts a pass.

use crate::diagnostics::{DiagnosticSink, Notice};
use crate::errors::{EntryError, FatalError};
use crate::identifier::MemberCategory;
use crate::model::{GlueModuleInfo, GlueableInfo, ResolvedManifest};
use crate::resolver::SymbolResolver;
use crate::symbols::SymbolTable;
use crate::validator::{Rule, Validator};
use glue_manifest::{GlueableEntry, GlueableKind, Manifest, ModuleEntry};
use std::path::Path;
use tracing::{debug, info};

/// Rules a glueable of `kind` has to satisfy
pub fn rules_for(kind: GlueableKind) -> &'static [Rule] {
    match kind {
        GlueableKind::StaticMethod => &[Rule::Static, Rule::Accessibility],
        GlueableKind::StaticField => &[Rule::Static, Rule::Final, Rule::Accessibility],
        GlueableKind::InstanceMethod
        | GlueableKind::Interface
        | GlueableKind::AbstractClass
        | GlueableKind::Class => &[Rule::Accessibility],
    }
}

/// Rules a module's entity type has to satisfy
pub const MODULE_RULES: &[Rule] = &[Rule::Accessibility];

/// Entry counts for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub modules_resolved: usize,
    pub modules_dropped: usize,
    pub glueables_resolved: usize,
    pub glueables_dropped: usize,
}

impl PassSummary {
    pub fn dropped(&self) -> usize {
        self.modules_dropped + self.glueables_dropped
    }
}

pub struct ManifestResolver<'t, T: SymbolTable + ?Sized> {
    resolver: SymbolResolver<'t, T>,
    validator: Validator<'t, T>,
}

impl<'t, T: SymbolTable + ?Sized> ManifestResolver<'t, T> {
    pub fn new(table: &'t T) -> Self {
        Self {
            resolver: SymbolResolver::new(table),
            validator: Validator::new(table),
        }
    }

    /// Resolve every entry of `manifest`, reporting failures to `sink`.
    pub fn build(&self, manifest: &Manifest, sink: &mut dyn DiagnosticSink) -> ResolvedManifest {
        self.build_with_summary(manifest, sink).0
    }

    pub fn build_with_summary(
        &self,
        manifest: &Manifest,
        sink: &mut dyn DiagnosticSink,
    ) -> (ResolvedManifest, PassSummary) {
        let mut resolved = ResolvedManifest::default();
        let mut summary = PassSummary::default();

        for entry in &manifest.modules {
            match self.resolve_module(entry) {
                Ok(module) => {
                    debug!("Resolved module {}", entry.entity_type_name);
                    resolved.push_module(module);
                    summary.modules_resolved += 1;
                }
                Err(err) => {
                    report(sink, &err, &entry.entity_type_name);
                    summary.modules_dropped += 1;
                }
            }
        }

        for entry in &manifest.glueables {
            match self.resolve_glueable(entry) {
                Ok(glueable) => {
                    debug!("Resolved {} {} as \"{}\"", entry.kind, entry.identifier, entry.key);
                    resolved.push_glueable(glueable);
                    summary.glueables_resolved += 1;
                }
                Err(err) => {
                    report(sink, &err, &entry.identifier);
                    summary.glueables_dropped += 1;
                }
            }
        }

        info!(
            "Resolved {} modules and {} glueables ({} entries dropped)",
            summary.modules_resolved,
            summary.glueables_resolved,
            summary.dropped()
        );
        (resolved, summary)
    }

    /// Load the manifest at `path` and resolve it. Failing to read it is fatal.
    pub fn resolve_file(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ResolvedManifest, FatalError> {
        let manifest = Manifest::load_from_path(path)?;
        Ok(self.build(&manifest, sink))
    }

    pub fn resolve_module(&self, entry: &ModuleEntry) -> Result<GlueModuleInfo, EntryError> {
        let entity_type = self
            .resolver
            .resolve_identifier(&entry.entity_type_name, MemberCategory::Type)?;
        self.validator.validate_all(&entity_type, MODULE_RULES)?;
        let unimplemented = self.resolver.find_unimplemented_methods(&entity_type)?;

        Ok(GlueModuleInfo::new(
            entity_type,
            entry.factory_package.clone(),
            entry.factory_name.clone(),
            unimplemented,
        ))
    }

    pub fn resolve_glueable(&self, entry: &GlueableEntry) -> Result<GlueableInfo, EntryError> {
        let symbol = self
            .resolver
            .resolve_identifier(&entry.identifier, MemberCategory::from(entry.kind))
            .map_err(|err| err.describing(entry.kind.describe()))?;
        self.validator.validate_all(&symbol, rules_for(entry.kind))?;

        Ok(GlueableInfo::new(
            entry.kind,
            symbol,
            entry.key.clone(),
            entry.enabled,
        ))
    }
}

fn report(sink: &mut dyn DiagnosticSink, err: &EntryError, identifier: &str) {
    debug!("Dropping manifest entry {}: {}", identifier, err);
    sink.notice(Notice::note(err.to_string(), Some(err.related(identifier))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Related;
    use crate::symbols::{Modifier, Modifiers};
    use crate::universe::SymbolUniverse;

    fn universe() -> SymbolUniverse {
        let mut universe = SymbolUniverse::new();
        let ns = universe.add_namespace("com.x");
        let y = universe.add_type(ns, "Y", Modifiers::from([Modifier::Public]));
        universe.add_field(
            y,
            "Z",
            Modifiers::from([Modifier::Public, Modifier::Static, Modifier::Final]),
        );
        universe.add_field(y, "MUTABLE", Modifiers::from([Modifier::Public, Modifier::Static]));
        universe.add_method(y, "create", Modifiers::from([Modifier::Public, Modifier::Static]));
        universe.add_method(y, "run", Modifiers::from([Modifier::Public]));
        universe
    }

    #[test]
    fn test_rules_per_kind() {
        assert_eq!(
            rules_for(GlueableKind::StaticField),
            &[Rule::Static, Rule::Final, Rule::Accessibility]
        );
        assert_eq!(rules_for(GlueableKind::StaticMethod), &[Rule::Static, Rule::Accessibility]);
        assert_eq!(rules_for(GlueableKind::Class), &[Rule::Accessibility]);
    }

    #[test]
    fn test_one_valid_one_invalid_glueable() {
        let universe = universe();
        let manifest = Manifest {
            modules: Vec::new(),
            glueables: vec![
                GlueableEntry::new(GlueableKind::StaticField, "com.x.Y#Z", "good"),
                GlueableEntry::new(GlueableKind::StaticField, "com.x.Y#Missing", "bad"),
            ],
        };

        let mut notices: Vec<Notice> = Vec::new();
        let resolved = ManifestResolver::new(&universe).build(&manifest, &mut notices);

        assert_eq!(resolved.glueables().len(), 1);
        assert_eq!(resolved.glueables()[0].key(), "good");
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0].related,
            Some(Related::Identifier("com.x.Y#Missing".into()))
        );
    }

    #[test]
    fn test_instance_method_needs_no_static_modifier() {
        let universe = universe();
        let resolver = ManifestResolver::new(&universe);

        let entry = GlueableEntry::new(GlueableKind::InstanceMethod, "com.x.Y::run", "run");
        assert!(resolver.resolve_glueable(&entry).is_ok());

        let entry = GlueableEntry::new(GlueableKind::StaticMethod, "com.x.Y::run", "run");
        assert!(matches!(
            resolver.resolve_glueable(&entry),
            Err(EntryError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_static_method_names_its_kind() {
        let universe = universe();
        let resolver = ManifestResolver::new(&universe);

        let entry = GlueableEntry::new(GlueableKind::StaticMethod, "com.x.Gone::create", "create");
        let message = resolver
            .resolve_glueable(&entry)
            .err()
            .map(|err| err.to_string())
            .unwrap_or_default();
        assert!(
            message.starts_with("Failed to find type \"com.x.Gone\" containing the static method \"create\"."),
            "unexpected message: {message}"
        );

        let entry = GlueableEntry::new(GlueableKind::StaticField, "com.x.Y#Missing", "missing");
        let message = resolver
            .resolve_glueable(&entry)
            .err()
            .map(|err| err.to_string())
            .unwrap_or_default();
        assert!(
            message.starts_with("Failed to find static field \"Missing\" in type \"com.x.Y\"."),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn test_summary_counts_dropped_entries() {
        let universe = universe();
        let manifest = Manifest {
            modules: vec![ModuleEntry::new("com.x.Gone", "com.x.glue", "GoneFactory")],
            glueables: vec![
                GlueableEntry::new(GlueableKind::StaticMethod, "com.x.Y::create", "create"),
                GlueableEntry::new(GlueableKind::StaticField, "com.x.Y#MUTABLE", "mutable"),
                GlueableEntry::new(GlueableKind::Class, "com.x.Y", "type").disabled(),
            ],
        };

        let mut notices: Vec<Notice> = Vec::new();
        let (resolved, summary) =
            ManifestResolver::new(&universe).build_with_summary(&manifest, &mut notices);

        assert_eq!(
            summary,
            PassSummary {
                modules_resolved: 0,
                modules_dropped: 1,
                glueables_resolved: 2,
                glueables_dropped: 1,
            }
        );
        assert_eq!(notices.len(), summary.dropped());
        assert_eq!(resolved.enabled_glueables().count(), 1);
        assert_eq!(resolved.glueables()[1].kind(), GlueableKind::Class);
    }
}
