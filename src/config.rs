use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{KagoError, Result};

/// Global kago configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Price stored when automatic lookup fails or is skipped
    #[serde(default)]
    pub default_price: f64,

    /// Owner recorded on new items when --owner is not given.
    /// Falls back to $USER, then "local".
    #[serde(default)]
    pub default_owner: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_price: 0.0,
            default_owner: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| KagoError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Owner to record on an item when none was given explicitly
    pub fn owner_or_default(&self, explicit: Option<String>) -> String {
        explicit
            .or_else(|| self.default_owner.clone())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "local".to_string())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn db_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().join("kago.db"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "kago").ok_or_else(|| {
            KagoError::ConfigError("Could not determine home directory".to_string())
        })
    }
}
