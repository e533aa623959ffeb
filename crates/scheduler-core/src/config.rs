use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// View names accepted by `calendar.default_view`.
pub const VIEW_NAMES: [&str; 4] = ["annual", "monthly", "weekly", "daily"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted event file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Event storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Calendar view preferences
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Clock display settings
    #[serde(default)]
    pub clock: ClockConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File name of the persisted event set inside `data_dir`
    pub file_name: String,

    /// File name used for exported documents
    pub export_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_name: "events.json".to_string(),
            export_file_name: "scheduler-events.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// View shown on startup (annual, monthly, weekly, daily)
    pub default_view: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_view: "monthly".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Seconds between clock display refreshes
    pub refresh_seconds: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { refresh_seconds: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scheduler")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage: StorageConfig::default(),
            calendar: CalendarConfig::default(),
            clock: ClockConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings, which the
    /// caller logs once tracing is initialized.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_file_name(&self.storage.file_name, "storage.file_name", &mut result);
        self.validate_file_name(
            &self.storage.export_file_name,
            "storage.export_file_name",
            &mut result,
        );

        if !VIEW_NAMES.contains(&self.calendar.default_view.as_str()) {
            result.add_error(
                "calendar.default_view",
                format!(
                    "Unknown view '{}', expected one of: {}",
                    self.calendar.default_view,
                    VIEW_NAMES.join(", ")
                ),
            );
        }

        if self.clock.refresh_seconds == 0 {
            result.add_error("clock.refresh_seconds", "Refresh interval must be at least 1 second");
        } else if self.clock.refresh_seconds > 3600 {
            result.add_warning(
                "clock.refresh_seconds",
                "Clock refresh interval is more than an hour",
            );
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            result.add_error(
                "data_dir",
                format!("Path is not a directory: {}", self.data_dir.display()),
            );
        }

        if self.logging.filter.trim().is_empty() {
            result.add_warning("logging.filter", "Empty log filter, falling back to 'info'");
        }

        result
    }

    fn validate_file_name(&self, name: &str, field_name: &str, result: &mut ValidationResult) {
        if name.trim().is_empty() {
            result.add_error(field_name, "File name cannot be empty");
        } else if name.contains('/') || name.contains('\\') {
            result.add_error(field_name, "File name must not contain path separators");
        } else if !name.ends_with(".json") {
            result.add_warning(field_name, "File name does not end in .json");
        }
    }

    /// Full path of the persisted event file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.file_name)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("scheduler");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_unknown_default_view() {
        let mut config = Config::default();
        config.calendar.default_view = "fortnightly".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "calendar.default_view"));
    }

    #[test]
    fn test_zero_refresh_interval() {
        let mut config = Config::default();
        config.clock.refresh_seconds = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "clock.refresh_seconds"));
    }

    #[test]
    fn test_long_refresh_interval_is_warning() {
        let mut config = Config::default();
        config.clock.refresh_seconds = 7200;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "clock.refresh_seconds"));
    }

    #[test]
    fn test_empty_file_name() {
        let mut config = Config::default();
        config.storage.file_name = "  ".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "storage.file_name"));
    }

    #[test]
    fn test_file_name_with_separator() {
        let mut config = Config::default();
        config.storage.export_file_name = "../escape.json".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "storage.export_file_name"));
    }

    #[test]
    fn test_load_from_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.calendar.default_view, "monthly");
        assert_eq!(config.storage.export_file_name, "scheduler-events.json");
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.data_dir = dir.path().to_path_buf();
        config.calendar.default_view = "weekly".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.calendar.default_view, "weekly");
        assert_eq!(loaded.storage_path(), dir.path().join("events.json"));
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\ndefault_view = \"daily\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.calendar.default_view, "daily");
        assert_eq!(config.clock.refresh_seconds, 1);
        assert_eq!(config.storage.file_name, "events.json");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar\ndefault_view = 3\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
