//! Tracing setup for hosts embedding the copy action

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable consulted before the default directive.
pub const LOG_ENV: &str = "PROV_LOG";

/// Provision crates at `info`, everything else at `warn`.
pub const DEFAULT_DIRECTIVE: &str = "warn,prov_core=info,prov_fs=info";

/// Filter from `PROV_LOG`, or [`DEFAULT_DIRECTIVE`] when it is unset or
/// unparsable.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a compact subscriber on stderr, keyed by host and module fields
/// from [`crate::CopyAction::run`]'s span.
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
