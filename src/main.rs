// Cardex - Card-format exporter for ground water and heat transport solvers
// Copyright (c) 2025 Cardex Contributors
// Licensed under the MIT License

use cardex::cli::{load_config_or_default, Cli, Commands};
use cardex::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it is usable; the
    // command reports a broken config itself.
    let config = load_config_or_default(&cli.config).unwrap_or_default();
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.application.log_level.as_str());

    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cardex - card-format exporter"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the file log first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
        Commands::FormatTable(args) => args.execute(),
    }
}
