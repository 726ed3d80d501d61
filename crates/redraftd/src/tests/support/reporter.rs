//! Health reporter that records events for assertions.

use std::sync::Mutex;

use redraft_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;

/// Lifecycle events observed during a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded { provider: String },
    BootstrapFailed(String),
    Serving(String),
    Stopping,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events.lock().expect("events mutex").clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events.lock().expect("events mutex").push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config, provider: &str) {
        self.record(HealthEvent::BootstrapSucceeded {
            provider: provider.to_owned(),
        });
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn serving(&self, endpoint: &SocketEndpoint) {
        self.record(HealthEvent::Serving(endpoint.to_string()));
    }

    fn stopping(&self) {
        self.record(HealthEvent::Stopping);
    }
}
