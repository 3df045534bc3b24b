//! Filesystem primitives for Provision
//!
//! Provides controller-side path resolution, the canonical file digest,
//! atomic writes and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{Digest, compute_content_checksum, compute_file_checksum};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, resolve_local};
