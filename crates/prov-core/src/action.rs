//! The copy action: decides whether a destination is current and delegates
//!
//! One call to [`CopyAction::run`] handles one host, strictly in order:
//!
//! ```text
//! source -> local digest -> destination (+ remote digest) -> decision
//!        -> push -> permission fixup -> delegated operation
//! ```
//!
//! Any stage can end the run with a failed [`ResultRecord`].

use crate::args::ModuleArgs;
use crate::checksum::{ChecksumOracle, RemoteDigest};
use crate::config::RunnerOptions;
use crate::context::TaskContext;
use crate::destination::{DestinationResolver, source_name};
use crate::dispatch::{ExecutionHarness, ModuleDispatcher, Operation};
use crate::privilege::PrivilegeFixup;
use crate::result::ResultRecord;
use crate::source::{SourceResolver, SourceSpec};
use crate::template::{Templater, VarTemplater};
use crate::transport::Connection;
use crate::{Error, Result};
use prov_fs::{Digest, NormalizedPath};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of comparing the local and remote digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDecision {
    /// Content already matches; only attributes may need reconciling
    NoopAttributesOnly,
    /// Content differs; the file has to be pushed
    Transfer,
}

impl TransferDecision {
    pub fn from_digests(local: &Digest, remote: &RemoteDigest) -> Self {
        if remote.matches(local) {
            Self::NoopAttributesOnly
        } else {
            Self::Transfer
        }
    }

    /// The operation that follows this decision.
    pub fn operation(self) -> Operation {
        match self {
            Self::NoopAttributesOnly => Operation::File,
            Self::Transfer => Operation::Copy,
        }
    }
}

/// Staged location of `source` inside the remote temporary directory.
pub fn staged_path(tmp: &str, source: &NormalizedPath) -> Result<NormalizedPath> {
    Ok(NormalizedPath::remote(tmp).join(source_name(source)?))
}

/// Conditional file copy for one managed host.
///
/// Holds only configuration and collaborators, so one instance can serve
/// many hosts; every invocation works on its own paths and digests.
pub struct CopyAction {
    options: RunnerOptions,
    templater: Arc<dyn Templater>,
    harness: Arc<dyn ExecutionHarness>,
}

impl CopyAction {
    /// Create an action that templates paths with [`VarTemplater`].
    pub fn new(options: RunnerOptions, harness: Arc<dyn ExecutionHarness>) -> Self {
        Self {
            options,
            templater: Arc::new(VarTemplater::new()),
            harness,
        }
    }

    pub fn with_templater(mut self, templater: Arc<dyn Templater>) -> Self {
        self.templater = templater;
        self
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run the action against one host.
    ///
    /// Never returns an error: every failure becomes a record with
    /// `failed=true` and a message. A record produced by the delegated
    /// operation is returned unchanged.
    #[instrument(skip_all, fields(host = conn.host(), module = module_name, check = self.options.check))]
    pub fn run(
        &self,
        conn: &dyn Connection,
        tmp: &str,
        module_name: &str,
        module_args: &str,
        context: &TaskContext,
    ) -> ResultRecord {
        match self.execute(conn, tmp, module_args, context) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "copy action failed");
                ResultRecord::failure(e.to_string())
            }
        }
    }

    fn execute(
        &self,
        conn: &dyn Connection,
        tmp: &str,
        module_args: &str,
        context: &TaskContext,
    ) -> Result<ResultRecord> {
        let args = ModuleArgs::parse(module_args)?;
        let spec = SourceSpec::from_request(&args, context)?;
        let dest = args.dest.as_deref().ok_or(Error::MissingArguments)?;

        let source = SourceResolver::new(self.templater.as_ref(), &self.options.basedir)
            .resolve(&spec, context)?;

        let oracle = ChecksumOracle::new(conn, tmp);
        let local = oracle.local(&source)?;

        let destination = DestinationResolver::new(oracle).resolve(dest, &source)?;
        let staged = staged_path(tmp, &source)?;

        let decision = TransferDecision::from_digests(&local, &destination.remote);
        info!(
            source = %source,
            dest = %destination.path,
            ?decision,
            "compared digests"
        );

        if decision == TransferDecision::Transfer {
            if self.options.check {
                debug!("check mode, skipping transfer");
                return Ok(ResultRecord::changed(true));
            }

            conn.put_file(&source.to_native(), staged.as_str())
                .map_err(|e| Error::TransferFailed {
                    source_path: source.to_string(),
                    staged: staged.to_string(),
                    message: e.to_string(),
                })?;

            if PrivilegeFixup::required(&self.options) {
                PrivilegeFixup::new(conn, tmp).apply(&staged)?;
            }
        }

        ModuleDispatcher::new(self.harness.as_ref()).dispatch(
            decision.operation(),
            conn,
            tmp,
            &staged,
            &args,
            self.options.check,
            context,
        )
    }
}
