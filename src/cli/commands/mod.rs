//! CLI command implementations
//!
//! This module contains all CLI command implementations. Each command returns
//! its process exit code:
//! - `0` success
//! - `1` export completed with errors
//! - `2` configuration or spec error
//! - `5` fatal error

pub mod export;
pub mod init;
pub mod table;
pub mod validate;

/// Successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Export completed but logged errors
pub const EXIT_COMPLETED_WITH_ERRORS: i32 = 1;

/// Configuration or spec could not be used
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Output could not be written
pub const EXIT_FATAL: i32 = 5;
