//! Shared test utilities for the provision workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: recording [`Connection`](prov_core::Connection) and
//!   [`ExecutionHarness`](prov_core::ExecutionHarness) doubles sharing one
//!   [`EventLog`](fakes::EventLog)
//! - [`harness`]: [`LocalHarness`](harness::LocalHarness), a working harness
//!   for same-host end-to-end runs
//! - [`fixture`]: [`Fixture`](fixture::Fixture) temp-directory builder

pub mod fakes;
pub mod fixture;
pub mod harness;

pub use fakes::{Event, EventLog, RecordingConnection, RecordingHarness};
pub use fixture::Fixture;
pub use harness::LocalHarness;
