//! Config loading, validation, and path resolution.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::error::{MarklockError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(MarklockError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MarklockError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `.marklock.yaml` from `dir` if present, otherwise return defaults.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // Treat an empty document as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            MarklockError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            MarklockError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_dir` must not be blank
    /// - `lock_stale_minutes` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.lock_dir.trim().is_empty() {
            return Err(MarklockError::UserError(
                "config validation failed: lock_dir must not be empty".to_string(),
            ));
        }

        if self.lock_stale_minutes == 0 {
            return Err(MarklockError::UserError(
                "config validation failed: lock_stale_minutes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve `lock_dir` against `base` when it is relative.
    pub fn resolve_lock_dir<P: AsRef<Path>>(&self, base: P) -> PathBuf {
        let lock_dir = Path::new(&self.lock_dir);
        if lock_dir.is_absolute() {
            lock_dir.to_path_buf()
        } else {
            base.as_ref().join(lock_dir)
        }
    }
}
