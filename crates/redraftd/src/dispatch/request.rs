//! Request envelope parsing.

use serde::Deserialize;
use serde_json::Value;

use super::errors::DispatchError;

/// One request read from a client connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRequest {
    method: String,
    path: String,
    #[serde(default)]
    body: Value,
}

impl ApiRequest {
    /// Parses a JSONL line into a request.
    ///
    /// Trailing whitespace, including the newline delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedJsonl`] when the line is empty, is
    /// not JSON, or lacks `method` or `path`.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = line.trim_ascii_end();
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }
        let request: Self = serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)?;
        if request.path.trim().is_empty() {
            return Err(DispatchError::malformed("path field is empty"));
        }
        Ok(request)
    }

    /// Request method, trimmed.
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.trim()
    }

    /// Request path, trimmed.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.trim()
    }

    /// Request body; `null` when absent.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the request, returning its body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}
