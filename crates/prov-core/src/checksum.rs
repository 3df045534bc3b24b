//! Local and remote digests
//!
//! The local side hashes the source file in process. The remote side runs a
//! small shell probe whose output is either a `sha256sum` line or a single
//! status digit. Status digits and digests live in separate namespaces
//! ([`Digest`] always carries the `sha256:` prefix), so a status can never be
//! mistaken for a checksum.

use crate::transport::{Connection, shell_quote};
use crate::{Error, Result};
use prov_fs::{Digest, NormalizedPath, compute_file_checksum};
use tracing::debug;

/// What the host reported about a destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDigest {
    /// A regular, readable file with this content digest
    Value(Digest),
    /// Nothing usable at that path (missing or unreadable)
    Absent,
    /// The path exists and is a directory
    IsDirectory,
}

impl RemoteDigest {
    /// Whether the remote content is identical to `local`.
    pub fn matches(&self, local: &Digest) -> bool {
        matches!(self, Self::Value(remote) if remote == local)
    }
}

// Probe status codes
const STATUS_NO_TOOL: &str = "0";
const STATUS_MISSING: &str = "1";
const STATUS_UNREADABLE: &str = "2";
const STATUS_DIRECTORY: &str = "3";

/// Build the shell probe that reports the checksum of `path`.
pub fn checksum_probe(path: &str) -> String {
    let p = shell_quote(path);
    format!(
        "rc=0; [ -r {p} ] || rc=2; [ -f {p} ] || rc=1; [ -d {p} ] && echo 3 && exit 0; \
         (sha256sum {p} 2>/dev/null || shasum -a 256 {p} 2>/dev/null) || echo \"${{rc}}\""
    )
}

/// Interpret the stdout of [`checksum_probe`].
///
/// Only the last non-blank line is considered, so login banners and other
/// noise printed ahead of the probe are ignored.
pub fn parse_probe_output(stdout: &str) -> Result<RemoteDigest> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::Transport("empty checksum probe output".to_string()))?;

    // sha256sum escapes unusual file names and marks that with a leading '\'
    let token = line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_start_matches('\\');

    match token {
        STATUS_MISSING | STATUS_UNREADABLE => Ok(RemoteDigest::Absent),
        STATUS_DIRECTORY => Ok(RemoteDigest::IsDirectory),
        STATUS_NO_TOOL => Err(Error::Transport(
            "no SHA-256 utility available on the remote host".to_string(),
        )),
        hex => Digest::from_hex(hex)
            .map(RemoteDigest::Value)
            .ok_or_else(|| Error::Transport(format!("unexpected checksum probe output: {line}"))),
    }
}

/// Digest of a controller-side source file.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] when the path is missing, unreadable or
/// a directory.
pub fn local_digest(source: &NormalizedPath) -> Result<Digest> {
    if source.is_dir() {
        return Err(Error::SourceNotFound {
            path: source.to_string(),
        });
    }
    compute_file_checksum(&source.to_native()).map_err(|e| {
        debug!(source = %source, error = %e, "source is not readable");
        Error::SourceNotFound {
            path: source.to_string(),
        }
    })
}

/// Answers digest questions for one invocation.
#[derive(Clone, Copy)]
pub struct ChecksumOracle<'a> {
    conn: &'a dyn Connection,
    tmp: &'a str,
}

impl<'a> ChecksumOracle<'a> {
    pub fn new(conn: &'a dyn Connection, tmp: &'a str) -> Self {
        Self { conn, tmp }
    }

    /// Digest of the controller-side source.
    pub fn local(&self, source: &NormalizedPath) -> Result<Digest> {
        let digest = local_digest(source)?;
        debug!(source = %source, digest = %digest, "computed local digest");
        Ok(digest)
    }

    /// Digest of a destination path on the managed host.
    pub fn remote(&self, dest: &NormalizedPath) -> Result<RemoteDigest> {
        let digest = self.conn.remote_checksum(self.tmp, dest.as_str())?;
        debug!(host = self.conn.host(), dest = %dest, ?digest, "fetched remote digest");
        Ok(digest)
    }
}
