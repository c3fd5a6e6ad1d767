//! Configuration loading with environment variable substitution
//!
//! `${VAR}` placeholders are replaced before parsing, then `CARDEX_*`
//! variables override individual settings.

use super::schema::CardexConfig;
use crate::domain::errors::CardexError;
use crate::domain::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// # Errors
///
/// Returns an error if:
/// - The file doesn't exist or cannot be read
/// - A referenced environment variable is missing
/// - TOML parsing fails or an override has the wrong type
/// - Validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<CardexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CardexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CardexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access.
pub fn parse_config(contents: &str) -> Result<CardexConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CardexConfig = toml::from_str(&contents)
        .map_err(|e| CardexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CardexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Replaces `${VAR}` placeholders outside comment lines
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CardexError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed = processed.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|name| name == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed);
    }

    if !missing_vars.is_empty() {
        return Err(CardexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_bool(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            CardexError::Configuration(format!("{name} must be true or false, got '{val}'"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies `CARDEX_<SECTION>_<KEY>` overrides
fn apply_env_overrides(config: &mut CardexConfig) -> Result<()> {
    if let Ok(val) = std::env::var("CARDEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(strict) = env_bool("CARDEX_EXPORT_STRICT")? {
        config.export.strict = strict;
    }
    if let Ok(val) = std::env::var("CARDEX_EXPORT_FORMAT_TABLE") {
        config.export.format_table = Some(val.into());
    }
    if let Some(checksum) = env_bool("CARDEX_EXPORT_CHECKSUM")? {
        config.export.checksum = checksum;
    }

    if let Some(enabled) = env_bool("CARDEX_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("CARDEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CARDEX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
