//! Lifecycle reporting.

use std::sync::Arc;

use redraft_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer for daemon lifecycle events.
pub trait HealthReporter: Send + Sync {
    /// Configuration loading is about to begin.
    fn bootstrap_starting(&self);

    /// Bootstrap finished and the provider is wired.
    fn bootstrap_succeeded(&self, config: &Config, provider: &str);

    /// Bootstrap stopped at `error`.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// The listener accepts requests on `endpoint`.
    fn serving(&self, endpoint: &SocketEndpoint);

    /// A shutdown was requested.
    fn stopping(&self);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config, provider: &str) {
        (**self).bootstrap_succeeded(config, provider);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn serving(&self, endpoint: &SocketEndpoint) {
        (**self).serving(endpoint);
    }

    fn stopping(&self) {
        (**self).stopping();
    }
}

/// Reporter that emits each event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Creates the reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config, provider: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            socket = %config.daemon_socket(),
            provider,
            max_attempts = config.max_attempts(),
            request_timeout_secs = config.request_timeout().as_secs(),
            log_format = %config.log_format(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            %error,
            "daemon bootstrap failed"
        );
    }

    fn serving(&self, endpoint: &SocketEndpoint) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "serving",
            %endpoint,
            "daemon ready for requests"
        );
    }

    fn stopping(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "stopping",
            "daemon shutting down"
        );
    }
}
