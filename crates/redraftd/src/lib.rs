//! The redraft daemon.
//!
//! `redraftd` revises prose for clarity and style while keeping citations
//! and user-locked terms verbatim. Clients connect over a Unix or TCP socket
//! and send one JSONL request per connection; the daemon answers with one
//! JSONL line carrying an HTTP-style status and a JSON body.
//!
//! Requests flow through three layers:
//!
//! 1. dispatch validates the envelope and payload and maps failures to
//!    statuses
//! 2. the [`Orchestrator`] screens the request with the guardrail, extracts
//!    protected spans, and calls the rewriting provider until a candidate
//!    keeps every span or the attempt and time bounds run out
//! 3. the accepted candidate is measured and diffed against the original
//!
//! Startup is handled by [`bootstrap_with`], which loads configuration,
//! installs logging, prepares the socket directory, and selects the provider.
//! [`run_daemon`] adds the listener and waits for a termination signal.

mod bootstrap;
mod dispatch;
mod health;
mod process;
mod revision;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, ConfiguredProviderFactory, Daemon, ProviderFactory,
    SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{ApiRequest, ApiResponse, ApiRouter, DispatchError, Route};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use revision::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT, Orchestrator, RevisionError, RevisionOutcome,
    RevisionPolicy,
};
pub use telemetry::{TelemetryError, TelemetryHandle, initialise as initialise_telemetry};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
