/*
[INPUT]:  Optional YAML config file, TODO_DAY_* environment variables
[OUTPUT]: Validated application configuration
[POS]:    Configuration layer - storage location, validation policy, logging
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::{STORAGE_KEY, validate_key};
use crate::store::ValidationPolicy;

const APP_DIR_NAME: &str = "todo-day";
const MIN_TICK_RATE_MS: u64 = 16;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory holding `<storage_key>.json`; defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Key of the task list inside the data dir
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// How edits are validated: "lenient" or "strict"
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// Tracing filter directive, e.g. "info" or "todo_day_core=debug".
    /// Unset means the binary picks a default per mode.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Also append logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// TUI redraw interval
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: default_storage_key(),
            validation: ValidationPolicy::default(),
            log_level: None,
            log_file: None,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl AppConfig {
    pub const ENV_PREFIX: &'static str = "TODO_DAY";

    /// Layer defaults, a config file and the environment.
    ///
    /// An explicit `path` must exist; otherwise the file at
    /// [`AppConfig::default_path`] is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    builder = builder.add_source(config::File::from(path).required(false));
                }
            }
        }
        builder = builder.add_source(
            config::Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document on top of the defaults
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/todo-day/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.yaml"))
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage_key).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.tick_rate_ms < MIN_TICK_RATE_MS {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_ms must be at least {MIN_TICK_RATE_MS}, got {}",
                self.tick_rate_ms
            )));
        }
        if self.log_level.as_deref().is_some_and(|level| level.trim().is_empty()) {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that read or write process environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, "tasks");
        assert_eq!(config.validation, ValidationPolicy::Lenient);
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
data_dir: /tmp/todo-day-test
storage_key: work
validation: strict
tick_rate_ms: 100
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/todo-day-test")));
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.validation, ValidationPolicy::Strict);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_level, None);
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/todo-day-test")
        );
    }

    #[test]
    fn test_rejects_bad_storage_key() {
        let result = AppConfig::from_yaml_str("storage_key: ../etc\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_tiny_tick_rate() {
        let result = AppConfig::from_yaml_str("tick_rate_ms: 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage_key: work\ntick_rate_ms: 500\n").unwrap();

        // SAFETY: environment access in this module is serialized by ENV_LOCK
        unsafe {
            std::env::set_var("TODO_DAY_VALIDATION", "strict");
            std::env::set_var("TODO_DAY_TICK_RATE_MS", "100");
        }
        let result = AppConfig::load(Some(&path));
        unsafe {
            std::env::remove_var("TODO_DAY_VALIDATION");
            std::env::remove_var("TODO_DAY_TICK_RATE_MS");
        }

        let config = result.unwrap();
        assert_eq!(config.validation, ValidationPolicy::Strict);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = AppConfig::load(Some(Path::new("/definitely/not/here/config.yaml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
