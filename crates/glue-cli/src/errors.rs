//! Errors surfaced by CLI commands

use glue_config::ConfigError;
use glue_resolver::{FatalError, UniverseError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load symbol universe: {0}")]
    Universe(#[from] UniverseError),

    #[error("{path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: FatalError,
    },

    #[error("No symbol universe given. Pass --symbols or set symbols-path with `gluemeister config set`")]
    NoSymbols,

    #[error("Failed to determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize resolved manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0} manifest entries could not be resolved")]
    NoticesReported(usize),
}
