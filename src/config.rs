// src/config.rs
//
// Runtime configuration
//
// Every field has a default; a config file only needs the keys it changes.
// Resolution order for the file: $JSTREAM_WATCH_CONFIG, then
// {config_dir}/jstream-watch/config.json. No file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{WatchThresholds, DEFAULT_LEDGER_CAPACITY};
use crate::error::{AppError, AppResult};

pub const CONFIG_ENV_VAR: &str = "JSTREAM_WATCH_CONFIG";
const APP_DIR: &str = "jstream-watch";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub tracker: TrackerConfig,
    pub player: PlayerConfig,
    pub storage: StorageConfig,
}

/// Debounce and threshold settings for progress tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    pub debounce_ms: u64,
    /// Minimum change (percentage points) vs. the last persisted value
    pub significant_delta_percent: f64,
    pub ledger_capacity: usize,
    pub ledger_min_percent: f64,
    pub finished_percent: f64,
    pub resume_min_duration_seconds: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 2000,
            significant_delta_percent: 1.0,
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
            ledger_min_percent: 1.0,
            finished_percent: 95.0,
            resume_min_duration_seconds: 10.0,
        }
    }
}

impl TrackerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn thresholds(&self) -> WatchThresholds {
        WatchThresholds {
            started_percent: self.ledger_min_percent,
            finished_percent: self.finished_percent,
            resume_min_duration: self.resume_min_duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Only messages from this origin are trusted
    pub trusted_origin: String,
    pub embed_base_url: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            trusted_origin: "https://www.vidking.net".to_string(),
            embed_base_url: "https://www.vidking.net".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Prefix of every storage key (`{namespace}:progress:...`)
    pub namespace: String,
    pub database_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: "app".to_string(),
            database_path: None,
        }
    }
}

impl StorageConfig {
    /// Configured path, or {data_dir}/jstream-watch/jstream-watch.db
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("jstream-watch.db"))
    }
}

impl AppConfig {
    /// Loads the config file if one exists, defaults otherwise.
    pub fn load() -> AppResult<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(custom) = std::env::var_os(CONFIG_ENV_VAR) {
            if !custom.is_empty() {
                return Some(PathBuf::from(custom));
            }
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
            .map_err(|e| AppError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        let t = &self.tracker;
        if t.ledger_capacity == 0 {
            return Err(AppError::Config("ledgerCapacity must be at least 1".to_string()));
        }
        if !(t.significant_delta_percent >= 0.0) {
            return Err(AppError::Config(
                "significantDeltaPercent must be a non-negative number".to_string(),
            ));
        }
        if !(t.ledger_min_percent < t.finished_percent) {
            return Err(AppError::Config(
                "ledgerMinPercent must be below finishedPercent".to_string(),
            ));
        }
        if self.storage.namespace.trim().is_empty() {
            return Err(AppError::Config("storage namespace must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tracker.debounce(), Duration::from_millis(2000));
        assert_eq!(config.tracker.ledger_capacity, 20);
        assert_eq!(config.storage.namespace, "app");
        assert_eq!(config.player.trusted_origin, "https://www.vidking.net");
        assert_eq!(config.tracker.thresholds(), WatchThresholds::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"tracker": {"debounceMs": 500}}"#).unwrap();
        assert_eq!(config.tracker.debounce_ms, 500);
        assert_eq!(config.tracker.finished_percent, 95.0);
        assert_eq!(config.storage.namespace, "app");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_json(r#"{"tracker": {"ledgerCapacity": 0}}"#).is_err());
        assert!(AppConfig::from_json(r#"{"tracker": {"ledgerMinPercent": 99}}"#).is_err());
        assert!(AppConfig::from_json(r#"{"storage": {"namespace": " "}}"#).is_err());
        assert!(AppConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"player": {{"trustedOrigin": "https://player.test"}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.player.trusted_origin, "https://player.test");
        assert_eq!(config.player.embed_base_url, "https://www.vidking.net");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/jstream/config.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let storage = StorageConfig {
            namespace: "app".to_string(),
            database_path: Some(PathBuf::from("/tmp/progress.db")),
        };
        assert_eq!(
            storage.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/progress.db")
        );
    }
}
