//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the cardex configuration file and the format table it names.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let table = match config.export.load_format_table() {
            Ok(table) => {
                println!("✅ Format table is valid");
                table
            }
            Err(e) => {
                println!("❌ Format table is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let table_source = config
            .export
            .format_table
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in ground water table".to_string());

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Strict: {}", config.export.strict);
        println!("  Checksum: {}", config.export.checksum);
        println!("  Format Table: {table_source}");
        for (name, cards) in &table.categories {
            println!("    {name}: {} cards", cards.len());
        }
        println!(
            "    boundary conditions: {}",
            table.boundary_conditions.len()
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}
