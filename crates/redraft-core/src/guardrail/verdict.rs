//! Guardrail verdict types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed message returned to clients when a request is refused.
pub const REFUSAL_MESSAGE: &str =
    "Not supported. This app improves clarity and style while preserving meaning and citations.";

/// Why a request was refused.
///
/// Variants are ordered by precedence: when several categories match, the
/// smallest one is reported.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ReasonCode {
    /// Making text undetectable by AI-content detectors.
    EvadeDetection,
    /// Evading plagiarism or similarity checks.
    EvadePlagiarismCheck,
    /// Otherwise facilitating academic dishonesty.
    AcademicDishonesty,
    /// No policy concern.
    #[default]
    None,
}

impl ReasonCode {
    /// Returns the identifier used in logs and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EvadeDetection => "EvadeDetection",
            Self::EvadePlagiarismCheck => "EvadePlagiarismCheck",
            Self::AcademicDishonesty => "AcademicDishonesty",
            Self::None => "None",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Allow or deny decision with its reason.
///
/// # Example
///
/// ```
/// use redraft_core::{GuardrailVerdict, ReasonCode};
///
/// let verdict = GuardrailVerdict::deny(ReasonCode::EvadeDetection);
/// assert!(!verdict.allowed());
/// assert_eq!(GuardrailVerdict::allow().reason_code(), ReasonCode::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailVerdict {
    allowed: bool,
    reason_code: ReasonCode,
}

impl GuardrailVerdict {
    /// A verdict permitting the request.
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            reason_code: ReasonCode::None,
        }
    }

    /// A verdict refusing the request for `reason_code`.
    #[must_use]
    pub const fn deny(reason_code: ReasonCode) -> Self {
        Self {
            allowed: false,
            reason_code,
        }
    }

    /// Builds a verdict from the strongest matched reason, if any.
    #[must_use]
    pub const fn from_reason(reason: Option<ReasonCode>) -> Self {
        match reason {
            Some(ReasonCode::None) | None => Self::allow(),
            Some(code) => Self::deny(code),
        }
    }

    /// Whether the request may proceed.
    #[must_use]
    pub const fn allowed(&self) -> bool {
        self.allowed
    }

    /// The reason for a refusal, or [`ReasonCode::None`].
    #[must_use]
    pub const fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }
}
