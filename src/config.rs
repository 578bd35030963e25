//! Tunables for the progress animation.
//!
//! Every field has a default, so a config file only needs the keys it overrides:
//!
//! ```json
//! { "tick_interval_ms": 250, "progress_ceiling": 85 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const CONFIG_DIR_NAME: &str = "busybar";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Timing and shape of the simulated progress climb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Period of the animator tick
    pub tick_interval_ms: u64,
    /// How long the bar stays at 100% before the state resets
    pub fade_delay_ms: u64,
    /// Progress shown as soon as the first request starts
    pub initial_progress: f32,
    /// Upper bound of the animated climb while requests are in flight
    pub progress_ceiling: f32,
    /// Largest random step a single tick may add
    pub max_increment: f32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            fade_delay_ms: 500,
            initial_progress: 10.0,
            progress_ceiling: 90.0,
            max_increment: 10.0,
        }
    }
}

impl LoaderConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    /// Checks the relations the animator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.fade_delay_ms == 0 {
            return Err(ConfigError::Invalid("fade_delay_ms must be positive".into()));
        }
        if !(self.max_increment > 0.0 && self.max_increment.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "max_increment must be positive and finite, got {}",
                self.max_increment
            )));
        }
        if !(self.progress_ceiling > 0.0 && self.progress_ceiling < 100.0) {
            return Err(ConfigError::Invalid(format!(
                "progress_ceiling must lie strictly between 0 and 100, got {}",
                self.progress_ceiling
            )));
        }
        if !(self.initial_progress >= 0.0 && self.initial_progress <= self.progress_ceiling) {
            return Err(ConfigError::Invalid(format!(
                "initial_progress must lie in [0, {}], got {}",
                self.progress_ceiling, self.initial_progress
            )));
        }
        Ok(())
    }

    /// Copy with every field that fails [`validate`](Self::validate) replaced by a
    /// usable value. Constructors run configs through this so a hand-built config
    /// can never stall or panic the animator.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();

        if config.tick_interval_ms == 0 {
            config.tick_interval_ms = defaults.tick_interval_ms;
        }
        if config.fade_delay_ms == 0 {
            config.fade_delay_ms = defaults.fade_delay_ms;
        }
        if !(config.max_increment > 0.0 && config.max_increment.is_finite()) {
            config.max_increment = defaults.max_increment;
        }
        if !(config.progress_ceiling > 0.0 && config.progress_ceiling < 100.0) {
            config.progress_ceiling = defaults.progress_ceiling;
        }
        if !(config.initial_progress >= 0.0 && config.initial_progress <= config.progress_ceiling) {
            config.initial_progress = defaults.initial_progress.min(config.progress_ceiling);
        }

        if &config != self {
            warn!(original = ?self, repaired = ?config, "invalid loader config replaced with usable values");
        }
        config
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Loads `path` if it exists, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring loader config");
                Self::default()
            }
        }
    }

    /// `<config_dir>/busybar/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = LoaderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_millis(500));
        assert_eq!(config.fade_delay(), Duration::from_millis(500));
        assert_eq!(config.initial_progress, 10.0);
        assert_eq!(config.progress_ceiling, 90.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LoaderConfig::from_json_str(r#"{ "tick_interval_ms": 250 }"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.fade_delay_ms, 500);
        assert_eq!(config.max_increment, 10.0);
    }

    #[test]
    fn test_rejects_ceiling_at_completion() {
        let err = LoaderConfig::from_json_str(r#"{ "progress_ceiling": 100 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_initial_above_ceiling() {
        let err = LoaderConfig::from_json_str(
            r#"{ "initial_progress": 95, "progress_ceiling": 80 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let err = LoaderConfig::from_json_str(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));
    }

    #[test]
    fn test_sanitized_keeps_valid_config() {
        let config = LoaderConfig {
            tick_interval_ms: 250,
            progress_ceiling: 80.0,
            ..LoaderConfig::default()
        };
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_sanitized_repairs_every_field() {
        let broken = LoaderConfig {
            tick_interval_ms: 0,
            fade_delay_ms: 0,
            initial_progress: 150.0,
            progress_ceiling: f32::NAN,
            max_increment: 0.0,
        };
        let repaired = broken.sanitized();

        assert!(repaired.validate().is_ok());
        assert_eq!(repaired.tick_interval_ms, 500);
        assert_eq!(repaired.fade_delay_ms, 500);
        assert_eq!(repaired.max_increment, 10.0);
        assert_eq!(repaired.progress_ceiling, 90.0);
        assert_eq!(repaired.initial_progress, 10.0);
    }

    #[test]
    fn test_sanitized_initial_fits_low_ceiling() {
        let config = LoaderConfig {
            initial_progress: 50.0,
            progress_ceiling: 5.0,
            ..LoaderConfig::default()
        };
        let repaired = config.sanitized();
        assert_eq!(repaired.initial_progress, 5.0);
        assert!(repaired.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = LoaderConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fade_delay_ms": 800 }}"#).unwrap();

        let config = LoaderConfig::load(file.path()).unwrap();
        assert_eq!(config.fade_delay_ms, 800);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoaderConfig::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_load_or_default_on_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_increment": -1 }}"#).unwrap();

        let config = LoaderConfig::load_or_default(file.path());
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoaderConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
