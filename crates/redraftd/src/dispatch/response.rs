//! Response envelope and JSONL framing.

use std::io::Write;

use serde::Serialize;
use serde_json::{Value, json};

use redraft_core::REFUSAL_MESSAGE;

use crate::revision::RevisionError;

use super::errors::DispatchError;

/// One response written back to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    status: u16,
    body: Value,
}

impl ApiResponse {
    /// A response with an arbitrary status and body.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A `200` response.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// The fixed `200` refusal returned for guardrail denials.
    #[must_use]
    pub fn refusal() -> Self {
        Self::ok(json!({ "error": REFUSAL_MESSAGE }))
    }

    /// An error response carrying the error's status and message.
    ///
    /// Revision failures also report the attempt count, and lock exhaustion
    /// lists the spans missing from the last candidate as `lastViolations`.
    #[must_use]
    pub fn from_error(error: &DispatchError) -> Self {
        let message = error.to_string();
        let body = match error {
            DispatchError::Revision(RevisionError::LockViolation {
                attempts,
                violations,
            }) => json!({
                "error": message,
                "attempts": attempts,
                "lastViolations": violations,
            }),
            DispatchError::Revision(failure) => json!({
                "error": message,
                "attempts": failure.attempts(),
            }),
            _ => json!({ "error": message }),
        };
        Self::new(error.status(), body)
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }
}

/// Writes responses as JSONL lines.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `response` as one line and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write(&mut self, response: &ApiResponse) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, response).map_err(DispatchError::SerializeResponse)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the response for `error`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_error(&mut self, error: &DispatchError) -> Result<(), DispatchError> {
        self.write(&ApiResponse::from_error(error))
    }
}
