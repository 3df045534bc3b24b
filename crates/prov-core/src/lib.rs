//! Conditional remote file copy for Provision
//!
//! Given a source file on the controller and a destination on a managed
//! host, the [`CopyAction`] decides whether the destination already matches
//! and delegates to one of two idempotent follow-up operations:
//!
//! - **copy**: the content differs, so the file is staged on the host and
//!   installed by the `copy` operation
//! - **file**: the content matches, so only attributes are reconciled by the
//!   `file` operation
//!
//! # Collaborators
//!
//! The action does no I/O against the host itself. It talks to:
//!
//! - a [`Connection`] for remote commands, file pushes and remote checksums
//! - a [`Templater`] for rendering source path expressions
//! - an [`ExecutionHarness`] that runs the delegated operation
//!
//! # Example
//!
//! ```ignore
//! use prov_core::{CopyAction, LocalConnection, RunnerOptions, TaskContext};
//!
//! let action = CopyAction::new(RunnerOptions::new(), harness);
//! let record = action.run(
//!     &LocalConnection::new(),
//!     "/tmp/prov-1/",
//!     "copy",
//!     "src=files/motd dest=/etc/motd mode=0644",
//!     &TaskContext::new(),
//! );
//! assert!(!record.is_failed());
//! ```

pub mod action;
pub mod args;
pub mod checksum;
pub mod config;
pub mod context;
pub mod destination;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod privilege;
pub mod result;
pub mod source;
pub mod template;
pub mod transport;

pub use action::{CopyAction, TransferDecision, staged_path};
pub use args::ModuleArgs;
pub use checksum::{ChecksumOracle, RemoteDigest};
pub use config::RunnerOptions;
pub use context::TaskContext;
pub use destination::{DestinationResolver, ResolvedDestination};
pub use dispatch::{ExecutionHarness, ExecutionRequest, ModuleDispatcher, Operation};
pub use error::{Error, Result};
pub use privilege::PrivilegeFixup;
pub use result::ResultRecord;
pub use source::{SourceResolver, SourceSpec};
pub use template::{Templater, VarTemplater};
pub use transport::{CommandOutput, Connection, LocalConnection};
