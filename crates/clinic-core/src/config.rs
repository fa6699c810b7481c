//! Runtime configuration, stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the records live and how loud logging is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// JSON snapshot read by [`crate::logic::Logic::open`].
    pub data_file: PathBuf,
    /// Filter directive passed to [`crate::logging::init_from_config`] at start-up.
    pub log_level: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/clinic.json"),
            log_level: "info".to_string(),
        }
    }
}

impl ClinicConfig {
    /// Read config from `path`, falling back to defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ClinicConfig::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, ClinicConfig::default());
        assert_eq!(config.data_file, PathBuf::from("data/clinic.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf/config.json");
        let config = ClinicConfig {
            data_file: PathBuf::from("/var/clinic/records.json"),
            log_level: "debug".into(),
        };
        config.save(&path).unwrap();
        assert_eq!(ClinicConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"log_level":"warn"}"#).unwrap();

        let config = ClinicConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.data_file, PathBuf::from("data/clinic.json"));
    }

    #[test]
    fn test_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "log_level = warn").unwrap();
        assert!(matches!(ClinicConfig::load(&path), Err(ConfigError::Json(_))));
    }
}
