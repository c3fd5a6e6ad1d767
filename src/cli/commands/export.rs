//! Export command implementation
//!
//! This module implements the `export` command, which writes the card file
//! for an export spec.

use super::{EXIT_COMPLETED_WITH_ERRORS, EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use crate::cli::load_config_or_default;
use crate::core::export::{DiagnosticKind, ExportEngine, ExportSummary};
use crate::model::ExportSpec;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export spec file (JSON or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Override the output path named by the spec
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the selected analysis types (repeatable)
    #[arg(short, long = "analysis", value_name = "NAME")]
    pub analyses: Vec<String>,

    /// Succeed even when errors were logged, as long as the file was written
    #[arg(long)]
    pub lenient: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(spec = %self.spec.display(), "Starting export command");

        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let table = match config.export.load_format_table() {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load format table");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let mut spec = match ExportSpec::from_file(&self.spec) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load export spec");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        self.apply_overrides(&mut spec);

        let strict = config.export.strict && !self.lenient;
        let summary = ExportEngine::new(&table)
            .with_strict(strict)
            .with_checksum(config.export.checksum)
            .export(&spec);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, spec: &mut ExportSpec) {
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output path from CLI");
            spec.output_path = Some(output.clone());
        }

        if !self.analyses.is_empty() {
            tracing::info!(analyses = ?self.analyses, "Overriding analysis types from CLI");
            spec.analysis_types = self.analyses.clone();
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    let rendered = summary.diagnostics.render();
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    if !summary.completed {
        println!("❌ FILES NOT WRITTEN because of errors");
        return;
    }

    let marker = if summary.success() { "✅" } else { "⚠️" };
    let path = summary
        .output_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!("{marker} Wrote {path}");
    println!("  Lines: {}", summary.counters.lines_written);
    println!(
        "  Cards: {} written, {} skipped",
        summary.counters.cards_written, summary.counters.cards_skipped
    );
    println!("  Associations: {}", summary.counters.associations);
    if let Some(checksum) = &summary.checksum {
        println!("  SHA-256: {checksum}");
    }
}

/// Maps an export summary to the process exit code
pub fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.success() {
        return EXIT_SUCCESS;
    }
    if summary.completed {
        return EXIT_COMPLETED_WITH_ERRORS;
    }

    let io_failure = summary
        .diagnostics
        .errors()
        .iter()
        .any(|d| d.kind == DiagnosticKind::Io);
    if io_failure {
        EXIT_FATAL
    } else {
        EXIT_CONFIG_ERROR
    }
}
