//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used on both
//! sides of a transfer: locally for the source file and, via the remote
//! probe, for the destination.

use sha2::{Digest as _, Sha256};
use std::fmt;
use std::path::Path;

/// Prefix for all checksums produced by this module
pub const PREFIX: &str = "sha256:";

/// Length of a hex-encoded SHA-256 digest
const HEX_LEN: usize = 64;

/// An opaque content digest in the canonical `sha256:<hex>` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Wrap a digest that is already in canonical form.
    ///
    /// No validation is performed; use [`Digest::from_hex`] for untrusted
    /// tool output.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build a digest from the bare hex output of a tool such as `sha256sum`.
    ///
    /// Returns `None` unless `hex` is exactly 64 hex characters.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() == HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(format!("{}{}", PREFIX, hex.to_ascii_lowercase())))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: impl AsRef<[u8]>) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    Digest(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read, including when `path` is a
/// directory.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<Digest> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(Digest(format!("{}{:x}", PREFIX, hasher.finalize())))
}
