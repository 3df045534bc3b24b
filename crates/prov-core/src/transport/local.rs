//! Connection to the controller host itself

use super::{CommandOutput, Connection};
use crate::checksum::RemoteDigest;
use crate::{Error, Result};
use prov_fs::{NormalizedPath, compute_file_checksum, io};
use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

/// Runs everything on the local machine.
///
/// Commands go through `sh -c`, pushes are atomic local writes, and remote
/// checksums are computed in process.
#[derive(Debug, Clone)]
pub struct LocalConnection {
    host: String,
}

impl Default for LocalConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalConnection {
    pub fn new() -> Self {
        Self {
            host: "localhost".to_string(),
        }
    }
}

impl Connection for LocalConnection {
    fn host(&self) -> &str {
        &self.host
    }

    fn exec_command(&self, cmd: &str, tmp: &str) -> Result<CommandOutput> {
        trace!(cmd, tmp, "exec");
        let output = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .output()
            .map_err(|e| Error::Transport(format!("failed to spawn sh: {e}")))?;

        Ok(CommandOutput {
            // Killed by a signal
            rc: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn put_file(&self, local: &Path, remote: &str) -> Result<()> {
        debug!(local = %local.display(), remote, "put file");
        io::copy_atomic(&NormalizedPath::new(local), &NormalizedPath::remote(remote))?;
        Ok(())
    }

    fn remote_checksum(&self, _tmp: &str, path: &str) -> Result<RemoteDigest> {
        let path = Path::new(path);
        if path.is_dir() {
            return Ok(RemoteDigest::IsDirectory);
        }
        Ok(match compute_file_checksum(path) {
            Ok(digest) => RemoteDigest::Value(digest),
            Err(_) => RemoteDigest::Absent,
        })
    }
}
