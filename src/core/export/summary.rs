//! Export summary and reporting
//!
//! This module defines the result handed back to the host after one export.

use super::diagnostics::Diagnostics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Counters collected while writing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportCounters {
    /// Lines written, header and terminator included
    pub lines_written: usize,

    /// Cards written from the format table
    pub cards_written: usize,

    /// Cards skipped because of a card error
    pub cards_skipped: usize,

    /// Association ids assigned to boundary conditions
    pub associations: usize,
}

/// Summary of an export operation
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Final output path, if the spec named one
    pub output_path: Option<PathBuf>,

    /// The output was opened and the terminator written
    pub completed: bool,

    /// Any logged error fails the export
    pub strict: bool,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Duration of the export
    pub duration: Duration,

    /// Writing counters
    pub counters: ExportCounters,

    /// SHA-256 of the written output, when completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    /// Errors and warnings of the run
    pub diagnostics: Diagnostics,
}

impl ExportSummary {
    /// Create a new, not yet completed summary
    pub fn new(output_path: Option<PathBuf>, strict: bool) -> Self {
        Self {
            output_path,
            completed: false,
            strict,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            counters: ExportCounters::default(),
            checksum: None,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Host-facing result of the export
    ///
    /// The run must have completed; in strict mode it must also be free of
    /// logged errors.
    pub fn success(&self) -> bool {
        self.completed && (!self.strict || !self.diagnostics.has_errors())
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            output = ?self.output_path,
            completed = self.completed,
            success = self.success(),
            lines = self.counters.lines_written,
            cards = self.counters.cards_written,
            skipped = self.counters.cards_skipped,
            associations = self.counters.associations,
            duration_ms = self.duration.as_millis() as u64,
            checksum = self.checksum.as_deref().unwrap_or("-"),
            "Export finished"
        );

        if self.diagnostics.has_errors() {
            tracing::warn!(
                error_count = self.diagnostics.errors().len(),
                warning_count = self.diagnostics.warnings().len(),
                "Export completed with errors"
            );
        }

        if !self.completed {
            tracing::warn!("Export terminated unexpectedly -- output not written");
        }
    }
}
