//! GlueMeister manifest model
//!
//! Dependencies ship a glue config file describing which of their types need
//! generated factories (module entries) and which symbols may be bound by
//! generated code (glueable entries). This crate owns the raw shape of that
//! file and the fatal path of reading it. Resolving the entries against a
//! symbol table lives in `glue-resolver`.

pub mod errors;
pub mod manifest;
pub mod types;

pub use errors::ManifestError;
pub use types::{GlueableEntry, GlueableKind, Manifest, ModuleEntry};
