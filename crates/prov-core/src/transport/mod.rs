//! Transport collaborator
//!
//! A [`Connection`] is one open channel to one managed host. The copy action
//! only needs three things from it: run a command, push a file, and learn
//! the checksum of a remote path.

mod local;

pub use local::LocalConnection;

use crate::Result;
use crate::checksum::{RemoteDigest, checksum_probe, parse_probe_output};
use std::path::Path;

/// Captured outcome of a remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub rc: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            rc: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(rc: i32, stderr: impl Into<String>) -> Self {
        Self {
            rc,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.rc == 0
    }
}

/// Trait for connections to a managed host.
pub trait Connection: Send + Sync {
    /// Name of the host this connection talks to, for logging.
    fn host(&self) -> &str;

    /// Run a shell command on the host.
    ///
    /// `tmp` is the remote temporary directory of the current task. An `Err`
    /// means the command could not be run at all; a non-zero exit status is
    /// reported through [`CommandOutput::rc`].
    fn exec_command(&self, cmd: &str, tmp: &str) -> Result<CommandOutput>;

    /// Copy a controller-side file to `remote` on the host.
    fn put_file(&self, local: &Path, remote: &str) -> Result<()>;

    /// Fetch the checksum of a remote path.
    ///
    /// The default implementation runs a shell probe through
    /// [`Connection::exec_command`].
    fn remote_checksum(&self, tmp: &str, path: &str) -> Result<RemoteDigest> {
        let output = self.exec_command(&checksum_probe(path), tmp)?;
        parse_probe_output(&output.stdout)
    }
}

/// Quote `value` for safe interpolation into a POSIX shell command.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"/._-+:@%,=".contains(&b))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
