//! GlueMeister resolution engine
//!
//! Turns a raw [`glue_manifest::Manifest`] into a [`ResolvedManifest`] by
//! resolving every identifier against a host [`SymbolTable`]:
//!
//! 1. [`identifier::parse`] splits `pkg.Type::method` / `pkg.Type#field` /
//!    `pkg.Type` into owner, member and category.
//! 2. [`SymbolResolver`] looks the parts up in the symbol table.
//! 3. [`Validator`] checks static/final/accessibility rules.
//! 4. [`ManifestResolver`] runs the three per entry, turning failures into
//!    [`Notice`]s for a [`DiagnosticSink`] instead of aborting the pass.

pub mod builder;
pub mod diagnostics;
pub mod errors;
pub mod identifier;
pub mod model;
pub mod resolver;
pub mod symbols;
pub mod universe;
pub mod validator;

pub use builder::{rules_for, ManifestResolver, PassSummary, MODULE_RULES};
pub use diagnostics::{DiagnosticSink, Notice, Related, TracingSink};
pub use errors::{
    AccessViolation, EntryError, FatalError, ParseError, ResolutionError, UniverseError,
    ValidationError,
};
pub use identifier::{MemberCategory, ParsedIdentifier};
pub use model::{GlueModuleInfo, GlueableInfo, ResolvedManifest};
pub use resolver::SymbolResolver;
pub use symbols::{
    Modifier, Modifiers, ResolvedSymbol, SymbolId, SymbolInfo, SymbolKind, SymbolTable,
};
pub use universe::SymbolUniverse;
pub use validator::{Rule, Validator};
