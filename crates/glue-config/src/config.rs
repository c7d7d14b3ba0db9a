use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Overrides the config file location (tests, isolated runs)
pub const CONFIG_ENV_VAR: &str = "GLUEMEISTER_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "manifest-root",
    "manifest-package",
    "manifest-file",
    "symbols-path",
    "fail-on-notice",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key \"{0}\". Valid keys: {keys}", keys = CONFIG_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value \"{value}\" for {key}: expected true or false")]
    InvalidBool { key: String, value: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory manifests are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_root: Option<String>,
    /// Dotted package the manifest lives in, e.g. `com.example.glue`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_file: Option<String>,
    /// Symbol universe JSON used when `resolve` gets no `--symbols`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols_path: Option<String>,
    /// Exit non-zero when a pass drops any entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_notice: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(ConfigError::NoHomeDir)?;

        Ok(base.join("gluemeister").join("gluemeister.toml"))
    }

    /// Load the config file, or the defaults when there is none yet
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "manifest-root" => self.manifest_root.clone(),
            "manifest-package" => self.manifest_package.clone(),
            "manifest-file" => self.manifest_file.clone(),
            "symbols-path" => self.symbols_path.clone(),
            "fail-on-notice" => self.fail_on_notice.map(|v| v.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "manifest-root" => self.manifest_root = Some(value),
            "manifest-package" => self.manifest_package = Some(value),
            "manifest-file" => self.manifest_file = Some(value),
            "symbols-path" => self.symbols_path = Some(value),
            "fail-on-notice" => {
                let parsed = value.parse().map_err(|_| ConfigError::InvalidBool {
                    key: key.to_string(),
                    value,
                })?;
                self.fail_on_notice = Some(parsed);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values_iter().is_empty()
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        let mut values = Vec::new();
        if let Some(ref val) = self.manifest_root {
            values.push(("manifest-root", val.clone()));
        }
        if let Some(ref val) = self.manifest_package {
            values.push(("manifest-package", val.clone()));
        }
        if let Some(ref val) = self.manifest_file {
            values.push(("manifest-file", val.clone()));
        }
        if let Some(ref val) = self.symbols_path {
            values.push(("symbols-path", val.clone()));
        }
        if let Some(val) = self.fail_on_notice {
            values.push(("fail-on-notice", val.to_string()));
        }
        values
    }

    pub fn fail_on_notice(&self) -> bool {
        self.fail_on_notice.unwrap_or(false)
    }
}
