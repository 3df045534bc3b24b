//! A minimal working harness for same-host runs.

use prov_core::{
    Connection, Error, ExecutionHarness, ExecutionRequest, ModuleArgs, Operation, Result,
    ResultRecord, TaskContext,
};
use prov_fs::{NormalizedPath, compute_file_checksum, io};

/// Executes `copy` and `file` requests directly on the local filesystem.
///
/// `copy` installs the staged file at `dest` (into it, if `dest` is a
/// directory). `file` reports the destination unchanged. Other arguments
/// are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHarness;

impl LocalHarness {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionHarness for LocalHarness {
    fn execute(
        &self,
        _conn: &dyn Connection,
        _tmp: &str,
        request: &ExecutionRequest,
        _context: &TaskContext,
    ) -> Result<ResultRecord> {
        let args = ModuleArgs::parse(&request.args)?;
        let (Some(src), Some(dest)) = (args.src, args.dest) else {
            return Ok(ResultRecord::failure("src and dest are required"));
        };
        let staged = NormalizedPath::remote(src);
        let mut dest = NormalizedPath::remote(dest);
        if (dest.has_trailing_separator() || dest.is_dir())
            && let Some(name) = staged.file_name()
        {
            dest = dest.join(name);
        }

        match request.operation {
            Operation::File => {
                Ok(ResultRecord::changed(false).with_extra("path", dest.as_str()))
            }
            Operation::Copy => {
                let current = compute_file_checksum(&dest.to_native()).ok();
                let staged_digest = compute_file_checksum(&staged.to_native()).map_err(|e| {
                    Error::Delegation {
                        module: "copy".to_string(),
                        message: format!("staged file {staged} unreadable: {e}"),
                    }
                })?;
                if current.as_ref() == Some(&staged_digest) {
                    return Ok(ResultRecord::changed(false).with_extra("dest", dest.as_str()));
                }
                io::copy_atomic(&staged, &dest)?;
                Ok(ResultRecord::changed(true)
                    .with_extra("dest", dest.as_str())
                    .with_extra("checksum", staged_digest.as_str()))
            }
        }
    }
}
