//! Configuration file support for Repshare.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/repshare/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Display/formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Unit abbreviation carried onto share bundles that format distances
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            distance_unit: default_distance_unit(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("repshare")
}

fn default_distance_unit() -> String {
    "mi".into()
}

impl Config {
    /// Load from the standard path, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!("no config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("loaded config from {:?}", path);
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/repshare/config.toml`.
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("repshare").join("config.toml")
    }

    /// Reject units the formatter has no abbreviation policy for
    pub fn validate(&self) -> Result<()> {
        match self.display.distance_unit.as_str() {
            "mi" | "km" | "m" => Ok(()),
            other => Err(Error::Config(format!(
                "unsupported distance unit `{}` (expected mi, km, or m)",
                other
            ))),
        }
    }

    /// Write the configuration out as pretty TOML, creating parent dirs.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("could not serialize config: {}", e)))?;
        std::fs::write(path, rendered)?;
        tracing::info!("saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.display.distance_unit, "mi");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config: Config = toml::from_str("[display]\ndistance_unit = \"km\"\n").unwrap();
        assert_eq!(config.display.distance_unit, "km");
        assert!(config.data.data_dir.ends_with("repshare"));
    }

    #[test]
    fn test_unsupported_unit_rejected() {
        let config: Config = toml::from_str("[display]\ndistance_unit = \"furlongs\"\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.display.distance_unit = "km".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.display.distance_unit, "km");
    }
}
