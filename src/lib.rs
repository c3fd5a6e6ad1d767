// Cardex - Card-format exporter for ground water and heat transport solvers
// Copyright (c) 2025 Cardex Contributors
// Licensed under the MIT License

//! # Cardex - card-format exporter
//!
//! Cardex writes the line-oriented "card" input file of a ground water flow
//! and heat/mass transport solver from a hierarchical attribute model.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Describing** cards with a data-driven [`core::format::FormatTable`]
//! - **Resolving** attribute items into card tokens
//! - **Writing** category sections in a fixed order, then per-entity blocks
//! - **Reporting** every problem on a diagnostics sink without stopping
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export engine, format table, value resolution, checksums
//! - [`model`] - The attribute model read by the exporter
//! - [`domain`] - Identifiers and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardex::core::export::ExportEngine;
//! use cardex::core::format::FormatTable;
//! use cardex::model::ExportSpec;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec = ExportSpec::from_file("model.toml")?;
//!
//!     let summary = ExportEngine::new(FormatTable::builtin()).export(&spec);
//!     summary.log_summary();
//!
//!     if !summary.success() {
//!         eprintln!("{}", summary.diagnostics.render());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Loading failures are [`domain::CardexError`]s. Problems found while
//! writing never abort the export; they are collected on the summary's
//! [`core::export::Diagnostics`], and only output failures end a run early.
//!
//! ## Logging
//!
//! Cardex uses structured logging with the `tracing` crate; see
//! [`logging::init_logging`].

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod model;
