//! Manifest loading
//!
//! A manifest that cannot be read or parsed is unusable as a whole, so every
//! failure here is returned as a single [`ManifestError`].

use crate::errors::ManifestError;
use crate::types::Manifest;
use std::path::Path;
use tracing::debug;

impl Manifest {
    /// Load a manifest from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        let manifest = Self::from_json_str(&content)?;
        debug!(
            "Loaded manifest {} ({} modules, {} glueables)",
            path.display(),
            manifest.modules.len(),
            manifest.glueables.len()
        );
        Ok(manifest)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize this manifest to a JSON string
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
