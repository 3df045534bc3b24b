//! [`Fixture`] temp-directory builder.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for laying out controller and
/// "remote" files.
///
/// # Example
///
/// ```rust,no_run
/// use prov_test_utils::Fixture;
///
/// let fx = Fixture::new();
/// let src = fx.write("files/app.conf", "listen 80\n");
/// fx.mkdir("etc/conf");
/// assert!(src.exists());
/// ```
pub struct Fixture {
    temp_dir: TempDir,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Fixture::new: failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the fixture, whether or not it exists.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// `path(rel)` as a string, with a trailing `/` when `rel` has one.
    pub fn path_str(&self, rel: &str) -> String {
        let mut s = self.path(rel.trim_end_matches('/')).to_string_lossy().into_owned();
        if rel.ends_with('/') {
            s.push('/');
        }
        s
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Fixture::write: failed to create parent");
        }
        fs::write(&path, content).expect("Fixture::write: failed to write file");
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("Fixture::mkdir: failed to create directory");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("Fixture::read: failed to read file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }
}
