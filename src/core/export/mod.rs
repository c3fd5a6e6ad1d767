//! Export orchestration
//!
//! This module provides the card export for cardex:
//! - Per-export scope and diagnostics
//! - The engine walking category sections in fixed order
//! - Per-entity card blocks
//! - Summary and reporting

pub mod diagnostics;
pub mod engine;
pub mod scope;
pub mod sections;
pub mod summary;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use engine::{ExportEngine, SECTION_ORDER, TERMINATOR};
pub use scope::{Association, Scope};
pub use summary::{ExportCounters, ExportSummary};
