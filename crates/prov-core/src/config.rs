//! Runner options for the copy action

use crate::Result;
use prov_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Account that needs no permission fixup after a push.
pub const ROOT_USER: &str = "root";

/// Per-play settings that shape how the copy action behaves.
///
/// Loadable from TOML, JSON or YAML via [`RunnerOptions::load`]; every field
/// has a default, so an empty file is valid.
///
/// ```toml
/// basedir = "/srv/playbooks"
/// check = false
/// sudo = true
/// sudo_user = "deploy"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerOptions {
    /// Directory that relative source paths are resolved against
    pub basedir: PathBuf,
    /// Dry-run: report what would change without changing it
    pub check: bool,
    /// Whether delegated operations run under privilege escalation
    pub sudo: bool,
    /// Account the escalated operations run as
    pub sudo_user: String,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            basedir: PathBuf::from("."),
            check: false,
            sudo: false,
            sudo_user: ROOT_USER.to_string(),
        }
    }
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a config file, format chosen by extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = basedir.into();
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Escalate to `user` for delegated operations.
    pub fn with_sudo(mut self, user: impl Into<String>) -> Self {
        self.sudo = true;
        self.sudo_user = user.into();
        self
    }

    /// Whether escalation switches to an account other than root.
    pub fn escalates_to_unprivileged(&self) -> bool {
        self.sudo && self.sudo_user != ROOT_USER
    }
}
