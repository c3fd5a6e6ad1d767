//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cardex using clap.

pub mod commands;

use crate::config::{load_config, CardexConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// cardex - card-format exporter for ground water and heat transport solvers
#[derive(Parser, Debug)]
#[command(name = "cardex")]
#[command(version, about, long_about = None)]
#[command(author = "Cardex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cardex.toml", env = "CARDEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CARDEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export an attribute spec to a card file
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Print the active format table as TOML
    FormatTable(commands::table::FormatTableArgs),
}

/// Loads the configuration file, or the defaults when it does not exist
///
/// # Errors
///
/// Returns an error if the file exists but is invalid.
pub fn load_config_or_default(path: &str) -> Result<CardexConfig> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        tracing::debug!(config_path = %path, "No configuration file, using defaults");
        Ok(CardexConfig::default())
    }
}
