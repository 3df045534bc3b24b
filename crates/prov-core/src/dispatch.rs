//! Delegation of the follow-up operation to the execution harness

use crate::args::ModuleArgs;
use crate::context::TaskContext;
use crate::result::ResultRecord;
use crate::transport::Connection;
use crate::{Error, Result};
use prov_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Marker appended to attribute-only requests in check mode.
pub const CHECK_MODE_MARKER: &str = "CHECKMODE=True";

/// The idempotent operations the copy action can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Install the staged file's content at the destination
    Copy,
    /// Reconcile attributes (mode, owner, ...) of an up-to-date destination
    File,
}

impl Operation {
    /// Module name understood by the harness.
    pub fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::File => "file",
        }
    }

    /// Build the request for this operation.
    pub fn request(
        self,
        args: &ModuleArgs,
        staged: &NormalizedPath,
        check_mode: bool,
    ) -> ExecutionRequest {
        let mut composed = args.with_src(staged);
        if self == Self::File && check_mode {
            composed.push(' ');
            composed.push_str(CHECK_MODE_MARKER);
        }
        ExecutionRequest {
            operation: self,
            args: composed,
            check_mode,
        }
    }

    /// Run this operation through `harness`.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        self,
        harness: &dyn ExecutionHarness,
        conn: &dyn Connection,
        tmp: &str,
        staged: &NormalizedPath,
        args: &ModuleArgs,
        check_mode: bool,
        context: &TaskContext,
    ) -> Result<ResultRecord> {
        let request = self.request(args, staged, check_mode);
        harness.execute(conn, tmp, &request, context)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully composed delegated call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub operation: Operation,
    /// Original module arguments plus `src=<staged path>`
    pub args: String,
    pub check_mode: bool,
}

impl ExecutionRequest {
    pub fn module_name(&self) -> &'static str {
        self.operation.name()
    }
}

/// Runs a named idempotent operation on the managed host.
///
/// Treated as a black box: whatever record it returns, including a failed
/// one, becomes the result of the copy action.
pub trait ExecutionHarness: Send + Sync {
    fn execute(
        &self,
        conn: &dyn Connection,
        tmp: &str,
        request: &ExecutionRequest,
        context: &TaskContext,
    ) -> Result<ResultRecord>;
}

/// Hands requests to the harness and passes its result through.
pub struct ModuleDispatcher<'a> {
    harness: &'a dyn ExecutionHarness,
}

impl<'a> ModuleDispatcher<'a> {
    pub fn new(harness: &'a dyn ExecutionHarness) -> Self {
        Self { harness }
    }

    /// Delegate `operation` and return the harness result verbatim.
    ///
    /// # Errors
    ///
    /// A harness that cannot run the operation at all is reported as
    /// [`Error::Delegation`]. A harness that runs it and reports failure is
    /// not an error here.
    #[allow(clippy::too_many_arguments)]
    pub fn dispatch(
        &self,
        operation: Operation,
        conn: &dyn Connection,
        tmp: &str,
        staged: &NormalizedPath,
        args: &ModuleArgs,
        check_mode: bool,
        context: &TaskContext,
    ) -> Result<ResultRecord> {
        info!(host = conn.host(), module = %operation, staged = %staged, "delegating");

        let record = operation
            .apply(self.harness, conn, tmp, staged, args, check_mode, context)
            .map_err(|e| match e {
                Error::Delegation { .. } => e,
                other => Error::Delegation {
                    module: operation.name().to_string(),
                    message: other.to_string(),
                },
            })?;

        if record.is_failed() {
            warn!(
                module = %operation,
                msg = record.msg.as_deref().unwrap_or_default(),
                "delegated operation reported failure"
            );
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ModuleArgs {
        ModuleArgs::parse("src=app.conf dest=/etc/app.conf mode=0644").unwrap()
    }

    #[test]
    fn copy_request_appends_staged_src() {
        let request = Operation::Copy.request(&args(), &"/tmp/s/app.conf".into(), false);
        assert_eq!(request.module_name(), "copy");
        insta::assert_snapshot!(
            request.args,
            @"src=app.conf dest=/etc/app.conf mode=0644 src=/tmp/s/app.conf"
        );
    }

    #[test]
    fn copy_request_never_carries_check_marker() {
        let request = Operation::Copy.request(&args(), &"/tmp/s/app.conf".into(), true);
        assert!(!request.args.contains(CHECK_MODE_MARKER));
        assert!(request.check_mode);
    }

    #[test]
    fn file_request_in_check_mode_carries_marker() {
        let request = Operation::File.request(&args(), &"/tmp/s/app.conf".into(), true);
        assert_eq!(request.module_name(), "file");
        insta::assert_snapshot!(
            request.args,
            @"src=app.conf dest=/etc/app.conf mode=0644 src=/tmp/s/app.conf CHECKMODE=True"
        );
    }

    #[test]
    fn operation_serializes_as_module_name() {
        assert_eq!(serde_json::to_string(&Operation::File).unwrap(), "\"file\"");
        assert_eq!(Operation::Copy.to_string(), "copy");
    }
}
