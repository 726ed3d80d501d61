//! JSONL protocol spoken with provider processes.
//!
//! The daemon writes one [`ProviderRequest`] line to the provider's stdin
//! and closes it. The provider writes one [`ProviderResponse`] line to
//! stdout and exits. Stderr is captured for diagnostic logging only.

use serde::{Deserialize, Serialize};

use crate::directive::RewriteDirective;
use crate::error::ProviderError;

/// Operation name carried by every request.
pub const REWRITE_OPERATION: &str = "rewrite";

/// Request sent to a provider process.
///
/// # Example
///
/// ```
/// use redraft_core::Controls;
/// use redraft_providers::{ProviderRequest, RewriteDirective};
///
/// let directive = RewriteDirective::new(&Controls::default(), Vec::new());
/// let request = ProviderRequest::new("Some text.", &directive);
/// assert_eq!(request.operation(), "rewrite");
/// assert_eq!(request.text(), "Some text.");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderRequest {
    operation: String,
    text: String,
    directive: RewriteDirective,
    prompt: String,
}

impl ProviderRequest {
    /// Builds a rewrite request, rendering the directive's prompt.
    #[must_use]
    pub fn new(text: impl Into<String>, directive: &RewriteDirective) -> Self {
        Self {
            operation: REWRITE_OPERATION.to_owned(),
            text: text.into(),
            prompt: directive.prompt(),
            directive: directive.clone(),
        }
    }

    /// Operation name.
    #[must_use]
    pub const fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Text to rewrite.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Structured directive.
    #[must_use]
    pub const fn directive(&self) -> &RewriteDirective {
        &self.directive
    }

    /// Rendered instructions.
    #[must_use]
    pub const fn prompt(&self) -> &str {
        self.prompt.as_str()
    }
}

/// Response read back from a provider process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ProviderResponse {
    /// A successful response carrying the candidate text.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            message: None,
        }
    }

    /// A refusal carrying the provider's reason.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            message: Some(message.into()),
        }
    }

    /// Whether the provider produced a candidate.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Candidate text, when present.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Failure reason, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Extracts the candidate text.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Rejected`] for a failure response and
    /// [`ProviderError::InvalidOutput`] for a success without text.
    pub fn into_text(self, name: &str) -> Result<String, ProviderError> {
        if !self.success {
            return Err(ProviderError::Rejected {
                name: name.to_owned(),
                message: self
                    .message
                    .unwrap_or_else(|| String::from("no reason given")),
            });
        }
        self.text.ok_or_else(|| ProviderError::InvalidOutput {
            name: name.to_owned(),
            message: String::from("successful response carried no text"),
        })
    }
}

#[cfg(test)]
mod tests;
