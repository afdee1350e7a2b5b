//! User settings loaded from `config.toml`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dashboard::DEFAULT_DAILY_GOAL_HOURS;
use crate::storage::{FileStorage, StorageError, DEFAULT_QUIET_PERIOD};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_daily_goal_hours() -> f64 {
    DEFAULT_DAILY_GOAL_HOURS
}

fn default_save_quiet_period_secs() -> u64 {
    DEFAULT_QUIET_PERIOD.as_secs()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where snapshots are stored (default: platform data dir)
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_daily_goal_hours")]
    pub daily_goal_hours: f64,
    /// Seconds without changes before a snapshot is written
    #[serde(default = "default_save_quiet_period_secs")]
    pub save_quiet_period_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            daily_goal_hours: default_daily_goal_hours(),
            save_quiet_period_secs: default_save_quiet_period_secs(),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("studyloop").join("config.toml"))
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from the default location, or defaults if there is none
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.daily_goal_hours.is_finite() || self.daily_goal_hours <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "daily_goal_hours must be positive, got {}",
                self.daily_goal_hours
            )));
        }
        if self.daily_goal_hours > 24.0 {
            return Err(ConfigError::Invalid(format!(
                "daily_goal_hours cannot exceed 24, got {}",
                self.daily_goal_hours
            )));
        }
        Ok(())
    }

    pub fn save_quiet_period(&self) -> Duration {
        Duration::from_secs(self.save_quiet_period_secs)
    }

    /// Configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf, StorageError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.daily_goal_hours, 6.0);
        assert_eq!(settings.save_quiet_period(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml("daily_goal_hours = 4.5\n").unwrap();
        assert_eq!(settings.daily_goal_hours, 4.5);
        assert_eq!(settings.save_quiet_period_secs, 5);
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/studyloop\"\nsave_quiet_period_secs = 1\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/studyloop")));
        assert_eq!(settings.resolve_data_dir().unwrap(), PathBuf::from("/tmp/studyloop"));
        assert_eq!(settings.save_quiet_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_toml("daily_goal_hours = 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_toml("daily_goal_hours = \"six\""),
            Err(ConfigError::Parse { .. })
        ));
    }
}
