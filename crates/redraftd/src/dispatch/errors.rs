//! Error types for request dispatch failures.
//!
//! Every variant maps to the HTTP status reported in the response envelope.

use std::io;

use thiserror::Error;

use crate::revision::RevisionError;

/// Errors surfaced while parsing, validating, or serving a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request line is not valid JSON or lacks the envelope fields.
    #[error("malformed request: {message}")]
    MalformedJsonl {
        /// Description of the parse failure.
        message: String,
        /// Underlying JSON error.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The body does not satisfy the route's schema or invariants.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// Description of the problem.
        message: String,
    },

    /// No route matches the path.
    #[error("unknown path: {path}")]
    UnknownPath {
        /// Requested path.
        path: String,
    },

    /// The route exists but does not accept the method.
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        /// Requested method.
        method: String,
        /// Requested path.
        path: String,
    },

    /// The request line exceeds the size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes received so far.
        size: usize,
        /// Limit in bytes.
        max_size: usize,
    },

    /// The revision could not be completed.
    #[error(transparent)]
    Revision(#[from] RevisionError),

    /// Reading or writing the connection failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The response could not be serialised.
    #[error("failed to serialise response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
}

impl DispatchError {
    /// HTTP status reported for this error.
    ///
    /// Revision failures distinguish exhausted lock retries (500), provider
    /// failures (502), and timeouts (504).
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::MalformedJsonl { .. } | Self::InvalidPayload { .. } => 400,
            Self::UnknownPath { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::RequestTooLarge { .. } => 413,
            Self::Revision(error) if error.is_timeout() => 504,
            Self::Revision(RevisionError::Provider { .. }) => 502,
            Self::Revision(_) | Self::Io(_) | Self::SerializeResponse(_) => 500,
        }
    }

    /// Wraps a JSON parse failure of the request line.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed-request error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJsonl {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid-payload error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates an unknown-path error.
    #[must_use]
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath { path: path.into() }
    }

    /// Creates a method-not-allowed error.
    #[must_use]
    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Creates a request-too-large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}
