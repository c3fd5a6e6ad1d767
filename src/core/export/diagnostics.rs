//! Diagnostics sink
//!
//! Non-fatal problems found during an export are collected here instead of
//! being raised. Errors and warnings are kept in separate ordered lists so a
//! host can surface errors first. Every record is also emitted via `tracing`.

use crate::domain::errors::CardError;
use serde::Serialize;
use std::fmt;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Error recorded before the export started
    Upstream,
    /// No output path in the spec
    MissingOutputPath,
    /// No analysis selected
    NoAnalysisTypes,
    /// Selected analysis is not declared
    UnknownAnalysisType,
    /// Constituent declared twice
    DuplicateConstituent,
    /// Discrete item selected an unknown branch
    UnexpectedDiscreteValue,
    /// Sub-item name differs from the expected one at that position
    UnexpectedSubitem,
    /// Discrete item without a custom writer
    UnsupportedDiscreteItem,
    /// Custom writer received a non-discrete item
    NotDiscrete,
    /// Required item absent
    MissingItem,
    /// Reference to an unknown attribute
    UnresolvedReference,
    /// Item without values
    EmptyItem,
    /// Boundary condition type without a card format
    MissingCardFormat,
    /// Boundary condition not applied to any entity
    UnassociatedBoundaryCondition,
    /// Association to an unknown or unsupported entity
    InvalidAssociation,
    /// Function series that cannot be written
    InvalidFunction,
    /// Domain without a material
    UnassignedDomain,
    /// Domain with more than one material
    MaterialConflict,
    /// Output could not be written
    Io,
}

impl From<&CardError> for DiagnosticKind {
    fn from(err: &CardError) -> Self {
        match err {
            CardError::UnsupportedDiscreteItem { .. } => DiagnosticKind::UnsupportedDiscreteItem,
            CardError::UnexpectedDiscreteValue { .. } => DiagnosticKind::UnexpectedDiscreteValue,
            CardError::NotDiscrete { .. } => DiagnosticKind::NotDiscrete,
            CardError::MissingItem { .. } => DiagnosticKind::MissingItem,
            CardError::UnresolvedReference { .. } => DiagnosticKind::UnresolvedReference,
            CardError::EmptyItem { .. } => DiagnosticKind::EmptyItem,
        }
    }
}

/// One recorded problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Problem kind
    pub kind: DiagnosticKind,

    /// Human readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Accumulated errors and warnings of one export
///
/// # Examples
///
/// ```
/// use cardex::core::export::{DiagnosticKind, Diagnostics};
///
/// let mut sink = Diagnostics::new();
/// sink.add_warning(DiagnosticKind::NoAnalysisTypes, "No analysis types selected");
/// assert!(!sink.has_errors());
///
/// sink.add_error(DiagnosticKind::MissingOutputPath, "Cannot export -- output filename missing");
/// assert!(sink.has_errors());
/// assert!(sink.render().starts_with("ERROR:"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error
    pub fn add_error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(kind = ?kind, message = %message, "Export error");
        self.errors.push(Diagnostic { kind, message });
    }

    /// Records a warning
    pub fn add_warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = ?kind, message = %message, "Export warning");
        self.warnings.push(Diagnostic { kind, message });
    }

    /// Records a card failure as an error
    pub fn add_card_error(&mut self, err: &CardError) {
        self.add_error(DiagnosticKind::from(err), err.to_string());
    }

    /// Whether any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether nothing at all was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Recorded errors, in order
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Recorded warnings, in order
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Number of errors of one kind
    pub fn error_count(&self, kind: DiagnosticKind) -> usize {
        self.errors.iter().filter(|d| d.kind == kind).count()
    }

    /// Number of warnings of one kind
    pub fn warning_count(&self, kind: DiagnosticKind) -> usize {
        self.warnings.iter().filter(|d| d.kind == kind).count()
    }

    /// Appends another sink's records
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Renders all records, errors first, one per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.errors {
            out.push_str("ERROR: ");
            out.push_str(&d.message);
            out.push('\n');
        }
        for d in &self.warnings {
            out.push_str("WARNING: ");
            out.push_str(&d.message);
            out.push('\n');
        }
        out
    }
}
