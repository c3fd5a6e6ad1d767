//! Output verification
//!
//! Checksums of exported card files, used to compare runs.

pub mod checksum;

pub use checksum::{calculate_checksum_bytes, RunningChecksum};
