use crate::config::Config;
use std::path::{Path, PathBuf};

/// File name used when no manifest file is configured
pub const DEFAULT_MANIFEST_FILE: &str = "gluemeister.json";

/// Where a manifest lives: `root/<package as directories>/file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    pub root: PathBuf,
    pub package: String,
    pub file_name: String,
}

impl ManifestLocation {
    pub fn new(root: impl Into<PathBuf>, package: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package: package.into(),
            file_name: file_name.into(),
        }
    }

    /// Location described by `config`, relative to `cwd` when no root is set
    pub fn from_config(config: &Config, cwd: &Path) -> Self {
        let root = config
            .manifest_root
            .as_deref()
            .map_or_else(|| cwd.to_path_buf(), |root| cwd.join(root));
        Self {
            root,
            package: config.manifest_package.clone().unwrap_or_default(),
            file_name: config
                .manifest_file
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string()),
        }
    }

    pub fn path(&self) -> PathBuf {
        let mut path = self.root.clone();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }
}
