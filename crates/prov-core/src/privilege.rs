//! Permission fixup for staged files under privilege escalation
//!
//! The push runs as the connecting user, but the delegated operation may run
//! as another, unprivileged account. That account has to be able to read
//! the staged file.

use crate::config::RunnerOptions;
use crate::transport::{Connection, shell_quote};
use crate::{Error, Result};
use prov_fs::NormalizedPath;
use tracing::debug;

/// Makes staged files readable for the escalated user.
pub struct PrivilegeFixup<'a> {
    conn: &'a dyn Connection,
    tmp: &'a str,
}

impl<'a> PrivilegeFixup<'a> {
    pub fn new(conn: &'a dyn Connection, tmp: &'a str) -> Self {
        Self { conn, tmp }
    }

    /// Whether a fixup is needed for these options.
    pub fn required(options: &RunnerOptions) -> bool {
        options.escalates_to_unprivileged()
    }

    /// The remote command that makes `staged` world-readable.
    pub fn command(staged: &NormalizedPath) -> String {
        format!("chmod a+r {}", shell_quote(staged.as_str()))
    }

    /// Run the fixup for `staged`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteCommandFailure`] if the command cannot be run
    /// or exits non-zero.
    pub fn apply(&self, staged: &NormalizedPath) -> Result<()> {
        let command = Self::command(staged);
        debug!(host = self.conn.host(), %command, "fixing staged file permissions");

        let output = self
            .conn
            .exec_command(&command, self.tmp)
            .map_err(|e| Error::RemoteCommandFailure {
                command: command.clone(),
                rc: -1,
                stderr: e.to_string(),
            })?;

        if !output.is_success() {
            return Err(Error::RemoteCommandFailure {
                command,
                rc: output.rc,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
