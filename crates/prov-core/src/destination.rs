//! Destination normalization
//!
//! The path used for the digest comparison is always a concrete file path.
//! A directory destination, whether written with a trailing separator or
//! discovered remotely, gets the source's base name appended.

use crate::checksum::{ChecksumOracle, RemoteDigest};
use crate::{Error, Result};
use prov_fs::NormalizedPath;
use tracing::{debug, warn};

/// A destination that has been resolved to a file path on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    /// Concrete file path on the managed host
    pub path: NormalizedPath,
    /// Remote digest fetched for `path`
    pub remote: RemoteDigest,
    /// Whether the host reported the original path as a directory
    pub retargeted: bool,
}

/// Base name of the source, used to retarget directory destinations.
pub fn source_name(source: &NormalizedPath) -> Result<&str> {
    source.file_name().ok_or_else(|| Error::SourceNotFound {
        path: source.to_string(),
    })
}

/// Apply the trailing-separator rule: `/etc/conf/` becomes `/etc/conf/<name>`.
pub fn concrete_destination(dest: &str, name: &str) -> NormalizedPath {
    let dest = NormalizedPath::remote(dest);
    if dest.has_trailing_separator() {
        dest.join(name)
    } else {
        dest
    }
}

/// Resolves a destination expression against the managed host.
#[derive(Clone, Copy)]
pub struct DestinationResolver<'a> {
    oracle: ChecksumOracle<'a>,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(oracle: ChecksumOracle<'a>) -> Self {
        Self { oracle }
    }

    /// Resolve `dest` for `source` and fetch its remote digest.
    ///
    /// Fetches at most twice: once for the concrete destination and, if the
    /// host reports a directory there, once more for the retargeted path.
    pub fn resolve(&self, dest: &str, source: &NormalizedPath) -> Result<ResolvedDestination> {
        let name = source_name(source)?;
        let path = concrete_destination(dest, name);
        let remote = self.oracle.remote(&path)?;

        if remote != RemoteDigest::IsDirectory {
            return Ok(ResolvedDestination {
                path,
                remote,
                retargeted: false,
            });
        }

        let path = path.join(name);
        debug!(dest = %path, "destination is a directory, retargeting");
        let remote = self.oracle.remote(&path)?;
        if remote == RemoteDigest::IsDirectory {
            warn!(dest = %path, "retargeted destination is also a directory");
        }

        Ok(ResolvedDestination {
            path,
            remote,
            retargeted: true,
        })
    }
}
