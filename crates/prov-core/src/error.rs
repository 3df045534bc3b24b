//! Error types for prov-core
//!
//! Every variant is terminal for one invocation. [`crate::CopyAction::run`]
//! converts them into failed [`crate::ResultRecord`]s, so the `Display`
//! text doubles as the task-level `msg`.

/// Result type for prov-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the copy action
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a source nor a destination could be found
    #[error("src and dest are required")]
    MissingArguments,

    /// The module argument string could not be tokenized
    #[error("invalid module arguments: {message}")]
    ArgumentSyntax { message: String },

    /// No entry of `first_available_file` exists on the controller
    #[error("could not find src in first_available_file list")]
    NoAvailableSource,

    /// The resolved source cannot be digested locally
    #[error("could not find src={path}")]
    SourceNotFound { path: String },

    /// A path expression could not be templated
    #[error("failed to template {expr:?}: {message}")]
    Template { expr: String, message: String },

    /// Pushing the source to its staged path failed
    #[error("failed to transfer {source_path} to {staged}: {message}")]
    TransferFailed {
        source_path: String,
        staged: String,
        message: String,
    },

    /// A remote command exited unsuccessfully
    #[error("remote command `{command}` failed with rc={rc}: {stderr}")]
    RemoteCommandFailure {
        command: String,
        rc: i32,
        stderr: String,
    },

    /// The execution harness could not run the delegated operation
    #[error("failed to execute {module} module: {message}")]
    Delegation { module: String, message: String },

    /// The transport could not carry out a request
    #[error("transport error: {0}")]
    Transport(String),

    /// Filesystem error from prov-fs
    #[error(transparent)]
    Fs(#[from] prov_fs::Error),
}
