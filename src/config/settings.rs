use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{ToolsError, ToolsResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Tool-wide settings loaded from config.toml or environment variables
/// This controls the tools themselves (NOT the Redfish service config being upgraded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub migrate: MigrateSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateSettings {
    /// Copy the original file to `<path>.backup` before overwriting it
    pub backup: bool,
    /// Write through a temporary file and rename it over the target
    pub atomic_write: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            migrate: MigrateSettings::default(),
        }
    }
}

impl Default for MigrateSettings {
    fn default() -> Self {
        Self {
            backup: false,
            atomic_write: true,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then the settings file, then environment overrides
    pub fn load() -> ToolsResult<Self> {
        let mut settings = Self::load_file(&Self::config_path())?;
        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read a settings file, falling back to defaults when it does not exist
    pub fn load_file(path: &Path) -> ToolsResult<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply `REDFISH_TOOLS_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ToolsResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("REDFISH_TOOLS_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Some(val) = lookup("REDFISH_TOOLS_BACKUP") {
            self.migrate.backup = env_bool("REDFISH_TOOLS_BACKUP", &val)?;
        }

        if let Some(val) = lookup("REDFISH_TOOLS_ATOMIC_WRITE") {
            self.migrate.atomic_write = env_bool("REDFISH_TOOLS_ATOMIC_WRITE", &val)?;
        }

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        if let Ok(custom_path) = std::env::var("REDFISH_TOOLS_CONFIG_PATH") {
            PathBuf::from(custom_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("redfish-tools")
                .join("config.toml")
        }
    }

    pub fn validate(&self) -> ToolsResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ToolsError::configuration(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

fn env_bool(name: &str, value: &str) -> ToolsResult<bool> {
    parse_bool(value).ok_or_else(|| {
        ToolsError::configuration(format!(
            "{} must be true, false, 1 or 0, got '{}'",
            name, value
        ))
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
