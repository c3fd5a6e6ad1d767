//! Core logic for cardex.
//!
//! # Modules
//!
//! - [`export`] - Export engine, scope, diagnostics and summary
//! - [`format`] - Card descriptors and the format table
//! - [`resolve`] - Item value resolution into card tokens
//! - [`verification`] - Output checksums
//!
//! # Export Workflow
//!
//! 1. **Check**: refuse upstream errors, require an output path
//! 2. **Header**: analysis and constituent lines
//! 3. **Sections**: Solvers, Time, Material, BoundaryCondition, Globals
//! 4. **Entity blocks**: material ids, functions, material assignments,
//!    boundary condition sets
//! 5. **Terminate**: `END`, then move the file into place

pub mod export;
pub mod format;
pub mod resolve;
pub mod verification;
