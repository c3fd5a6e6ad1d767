//! Domain error types
//!
//! This module defines the error hierarchy for cardex. [`CardexError`] covers
//! failures that stop an operation (configuration, spec loading, opening the
//! output), while [`CardError`] covers a single card that could not be written.
//! Card errors never abort an export; they are recorded on the diagnostics sink.

use thiserror::Error;

/// Main cardex error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum CardexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export spec could not be loaded or is malformed
    #[error("Spec error: {0}")]
    Spec(String),

    /// Format table could not be loaded or is malformed
    #[error("Format table error: {0}")]
    FormatTable(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failure to produce one card
///
/// Returned by the value resolver and by custom writers. The engine records
/// it on the diagnostics sink and skips the card.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardError {
    /// Discrete item reached a card without a custom writer
    #[error("Discrete item \"{item}\" requires a custom writer")]
    UnsupportedDiscreteItem { item: String },

    /// Discrete item selected a branch the writer does not know
    #[error("Unexpected discrete value {index} for item \"{item}\"")]
    UnexpectedDiscreteValue { item: String, index: i64 },

    /// Custom writer expected a discrete item
    #[error("Expected {item} to be discrete item - ignoring")]
    NotDiscrete { item: String },

    /// A required item or sub-item is absent
    #[error("Missing item \"{item}\" for card \"{opcode}\"")]
    MissingItem { item: String, opcode: String },

    /// Reference item does not point at a known attribute
    #[error("Item \"{item}\" references unknown attribute {target:?}")]
    UnresolvedReference {
        item: String,
        target: Option<String>,
    },

    /// Item values cannot be written on this card
    #[error("Item \"{item}\" has no values")]
    EmptyItem { item: String },
}

/// Failure while writing one card
///
/// A card failure skips that card; an I/O failure ends the export.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The card could not be produced
    #[error(transparent)]
    Card(#[from] CardError),

    /// The output stream failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cardex operations
pub type Result<T> = std::result::Result<T, CardexError>;

// Conversion from std::io::Error
impl From<std::io::Error> for CardexError {
    fn from(err: std::io::Error) -> Self {
        CardexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CardexError {
    fn from(err: serde_json::Error) -> Self {
        CardexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CardexError {
    fn from(err: toml::de::Error) -> Self {
        CardexError::Configuration(format!("TOML parse error: {err}"))
    }
}
