//! Errors that end the daemon process.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Failures surfaced by [`run_daemon`](super::run_daemon).
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrap failed.
    #[error("daemon bootstrap failed: {source}")]
    Bootstrap {
        /// Bootstrap error.
        #[source]
        source: BootstrapError,
    },
    /// The listener could not bind or stopped abnormally.
    #[error("daemon socket listener failed: {source}")]
    Listener {
        /// Listener error.
        #[source]
        source: ListenerError,
    },
    /// Waiting for a shutdown signal failed.
    #[error("failed to await shutdown signal: {source}")]
    Shutdown {
        /// Signal error.
        #[source]
        source: ShutdownError,
    },
}

impl From<BootstrapError> for LaunchError {
    fn from(source: BootstrapError) -> Self {
        Self::Bootstrap { source }
    }
}

impl From<ListenerError> for LaunchError {
    fn from(source: ListenerError) -> Self {
        Self::Listener { source }
    }
}

impl From<ShutdownError> for LaunchError {
    fn from(source: ShutdownError) -> Self {
        Self::Shutdown { source }
    }
}
