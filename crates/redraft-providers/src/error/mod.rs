//! Errors raised while obtaining a rewrite from a provider.
//!
//! I/O errors are wrapped in `Arc` to keep the enum small and cloneable
//! into logs.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from rewriting providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider process could not be spawned.
    #[error("provider '{name}' failed to start: {message}")]
    SpawnFailed {
        /// Provider name.
        name: String,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// The provider did not answer within its time allowance.
    #[error("provider '{name}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Provider name.
        name: String,
        /// Allowance in milliseconds.
        timeout_ms: u64,
    },

    /// The provider process exited with a non-zero status code.
    #[error("provider '{name}' exited with non-zero status {status}")]
    NonZeroExit {
        /// Provider name.
        name: String,
        /// Process exit status.
        status: i32,
    },

    /// The request could not be serialised to JSON.
    #[error("failed to serialise provider request: {0}")]
    SerializeRequest(#[source] serde_json::Error),

    /// The response could not be deserialised from JSON.
    #[error("failed to deserialise provider response: {message}")]
    DeserializeResponse {
        /// Human-readable description of the parse failure.
        message: String,
        /// Optional underlying JSON error.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The provider produced output that does not conform to the protocol.
    #[error("provider '{name}' wrote invalid output: {message}")]
    InvalidOutput {
        /// Provider name.
        name: String,
        /// Description of the protocol violation.
        message: String,
    },

    /// An I/O error occurred while communicating with the provider.
    #[error("I/O error communicating with provider '{name}': {source}")]
    Io {
        /// Provider name.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The provider executable was not found.
    #[error("provider '{name}' executable not found: {path}")]
    ExecutableNotFound {
        /// Provider name.
        name: String,
        /// Path that was tried.
        path: PathBuf,
    },

    /// The provider answered but declined to rewrite.
    #[error("provider '{name}' rejected the rewrite: {message}")]
    Rejected {
        /// Provider name.
        name: String,
        /// Reason reported by the provider.
        message: String,
    },

    /// The provider is not able to serve requests.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl ProviderError {
    /// Returns true when the provider ran out of time.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests;
