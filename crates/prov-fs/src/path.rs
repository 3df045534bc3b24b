//! Normalized path handling for controller and remote paths

use std::path::{Path, PathBuf};

/// A path that uses forward slashes as separators.
///
/// Controller paths are normalized with [`NormalizedPath::new`]. Paths on a
/// managed host are POSIX already and are taken verbatim with
/// [`NormalizedPath::remote`], so a backslash there stays part of the name.
/// Unlike [`PathBuf`], a trailing separator is preserved, because it decides
/// whether a destination names a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Take a managed-host path as given, without rewriting backslashes.
    pub fn remote(path: impl Into<String>) -> Self {
        Self { inner: path.into() }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for local I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the final component, ignoring any trailing separator.
    ///
    /// Returns `None` for the filesystem root and the empty path.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether the path was written with a trailing separator (`/etc/conf/`).
    pub fn has_trailing_separator(&self) -> bool {
        self.inner.ends_with('/')
    }

    /// Whether the path is absolute, in either Unix or drive-letter form.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || Path::new(&self.inner).is_absolute()
    }

    /// Check if this path exists on the local filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a local directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }
}

/// Resolve a controller-side path expression against a base directory.
///
/// - absolute paths are returned unchanged
/// - `~` and `~/...` expand against the current user's home directory
/// - anything else is joined onto `basedir`
pub fn resolve_local(basedir: &NormalizedPath, expr: &str) -> NormalizedPath {
    if let Some(rest) = expr.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with(['/', '\\']))
        && let Some(home) = dirs::home_dir()
    {
        let home = NormalizedPath::new(home);
        let rest = rest.trim_start_matches(['/', '\\']);
        return if rest.is_empty() { home } else { home.join(rest) };
    }

    let path = NormalizedPath::new(expr);
    if path.is_absolute() {
        path
    } else {
        basedir.join(expr)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
