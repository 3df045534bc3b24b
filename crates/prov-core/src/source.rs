//! Source file resolution on the controller

use crate::args::ModuleArgs;
use crate::context::TaskContext;
use crate::template::Templater;
use crate::{Error, Result};
use prov_fs::{NormalizedPath, resolve_local};
use std::path::Path;
use tracing::{debug, trace};

/// Where the source file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A single path expression from `src=`
    Literal(String),
    /// Ordered candidates from `first_available_file`; the first existing one wins
    FirstAvailable(Vec<String>),
}

impl SourceSpec {
    /// Pick the source form for a request.
    ///
    /// `first_available_file` takes precedence over `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArguments`] when `dest` is missing, or when
    /// there is neither a `src` nor a candidate list.
    pub fn from_request(args: &ModuleArgs, context: &TaskContext) -> Result<Self> {
        if args.dest.is_none() {
            return Err(Error::MissingArguments);
        }
        match (&context.first_available_file, &args.src) {
            (Some(candidates), _) => Ok(Self::FirstAvailable(candidates.clone())),
            (None, Some(src)) => Ok(Self::Literal(src.clone())),
            (None, None) => Err(Error::MissingArguments),
        }
    }
}

/// Turns a [`SourceSpec`] into one concrete controller path.
pub struct SourceResolver<'a> {
    templater: &'a dyn Templater,
    basedir: NormalizedPath,
}

impl<'a> SourceResolver<'a> {
    pub fn new(templater: &'a dyn Templater, basedir: &Path) -> Self {
        Self {
            templater,
            basedir: NormalizedPath::new(basedir),
        }
    }

    /// Resolve the source path.
    ///
    /// A literal source is returned without checking that it exists; the
    /// digest step reports that. Candidates are checked in order against
    /// the local filesystem.
    pub fn resolve(&self, spec: &SourceSpec, context: &TaskContext) -> Result<NormalizedPath> {
        match spec {
            SourceSpec::Literal(expr) => self.resolve_expr(expr, context),
            SourceSpec::FirstAvailable(candidates) => {
                for candidate in candidates {
                    let path = self.resolve_expr(candidate, context)?;
                    if path.exists() {
                        debug!(source = %path, "selected first available file");
                        return Ok(path);
                    }
                    trace!(candidate = %path, "candidate does not exist");
                }
                Err(Error::NoAvailableSource)
            }
        }
    }

    fn resolve_expr(&self, expr: &str, context: &TaskContext) -> Result<NormalizedPath> {
        let rendered = self.templater.render(expr, context)?;
        Ok(resolve_local(&self.basedir, &rendered))
    }
}
