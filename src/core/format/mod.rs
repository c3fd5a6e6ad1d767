//! Card format descriptors and the format table
//!
//! - [`card`] - descriptor variants and line building
//! - [`table`] - category to descriptor mapping, built in or loaded from TOML
//! - [`hooks`] - custom writers for discrete, multi-shape cards

pub mod card;
pub mod hooks;
pub mod table;

pub use card::{CardFormat, CardKind};
pub use hooks::CustomWriter;
pub use table::FormatTable;
