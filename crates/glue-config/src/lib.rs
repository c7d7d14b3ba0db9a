//! Configuration for the gluemeister CLI
//!
//! [`Config`] is a small TOML file of optional settings. [`ManifestLocation`]
//! turns the manifest-related settings into a path: manifests are looked up
//! by root directory, package and file name.

mod config;
mod location;

pub use config::{Config, ConfigError, CONFIG_ENV_VAR, CONFIG_KEYS};
pub use location::{ManifestLocation, DEFAULT_MANIFEST_FILE};
