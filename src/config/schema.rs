//! Configuration schema types
//!
//! This module defines the configuration structure for cardex.

use crate::core::format::table::FormatTable;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

/// Main cardex configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CardexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Any logged error makes the export unsuccessful
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Format table file; the built-in ground water table when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_table: Option<PathBuf>,

    /// Report the SHA-256 of the written file
    #[serde(default = "default_true")]
    pub checksum: bool,
}

impl ExportConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(path) = &self.format_table {
            if path.as_os_str().is_empty() {
                return Err("export.format_table cannot be empty".to_string());
            }
        }
        Ok(())
    }

    /// Format table named by this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured table file cannot be loaded.
    pub fn load_format_table(&self) -> Result<Cow<'static, FormatTable>> {
        match &self.format_table {
            Some(path) => Ok(Cow::Owned(FormatTable::from_file(path)?)),
            None => Ok(Cow::Borrowed(FormatTable::builtin())),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            strict: true,
            format_table: None,
            checksum: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CardexConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert!(config.export.strict);
        assert!(config.export.checksum);
        assert!(config.export.format_table.is_none());
        assert!(!config.logging.local_enabled);
        assert_eq!(config.logging.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CardexConfig = toml::from_str("").unwrap();
        assert!(config.export.strict);
        assert_eq!(config.logging.local_path, "./logs");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = CardexConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid log_level"));
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = CardexConfig::default();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builtin_table_when_unset() {
        let table = ExportConfig::default().load_format_table().unwrap();
        assert!(matches!(table, Cow::Borrowed(_)));
        assert!(!table.category("Material").is_empty());
    }
}
