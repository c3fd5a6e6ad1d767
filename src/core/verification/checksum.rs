//! Checksum calculation for exported files
//!
//! The exporter hashes every line as it is written so the summary can report
//! the SHA-256 of the produced file without reading it back.

use sha2::{Digest, Sha256};

/// Incremental SHA-256 over the bytes written to an output
///
/// # Examples
///
/// ```
/// use cardex::core::verification::checksum::{calculate_checksum_bytes, RunningChecksum};
///
/// let mut running = RunningChecksum::new();
/// running.update(b"OP GW\n");
/// running.update(b"END\n");
/// assert_eq!(running.finalize(), calculate_checksum_bytes(b"OP GW\nEND\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningChecksum {
    hasher: Sha256,
    bytes: u64,
}

impl RunningChecksum {
    /// Creates an empty checksum
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds more output bytes
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes += data.len() as u64;
    }

    /// Number of bytes hashed so far
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Hex-encoded digest of everything fed so far
    pub fn finalize(&self) -> String {
        format!("{:x}", self.hasher.clone().finalize())
    }
}

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
