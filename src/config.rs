use crate::error::{PetalError, PetalResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Storage
    pub db_path: String,
    pub audit_dir: String,

    // Scope
    #[serde(default)]
    pub default_branch: Option<String>,

    // Meta
    pub log_level: String,
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: dirs::data_dir()
                .unwrap_or_default()
                .join("petalbook/names.db")
                .to_string_lossy()
                .to_string(),
            audit_dir: dirs::data_dir()
                .unwrap_or_default()
                .join("petalbook")
                .to_string_lossy()
                .to_string(),
            default_branch: None,
            log_level: "INFO".to_string(),
            audit_enabled: true,
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> PetalResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`. A missing file yields defaults; a corrupt
    /// one is moved aside to `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> PetalResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> PetalResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> PetalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Parse `log_level` into a tracing level
    pub fn tracing_level(&self) -> PetalResult<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| PetalError::Config(format!("invalid log level '{}'", self.log_level)))
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("petalbook")
        .join("config.json")
}
