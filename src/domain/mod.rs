//! Domain types for cardex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`AttributeId`], [`EntityId`], [`AssociationId`])
//! - **Error types** ([`CardexError`], [`CardError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations that stop work return [`Result<T, CardexError>`]; a
//! single card that cannot be produced is reported as a [`CardError`]:
//!
//! ```rust
//! use cardex::domain::{CardError, CardexError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(CardexError::Spec("missing resource".to_string()))
//! }
//!
//! let card = CardError::UnsupportedDiscreteItem { item: "OutputInterval".into() };
//! assert!(card.to_string().contains("custom writer"));
//! assert!(load().is_err());
//! ```

pub mod errors;
pub mod ids;

pub use errors::{CardError, CardexError, Result, WriteError};
pub use ids::{AssociationId, AttributeId, EntityId};
