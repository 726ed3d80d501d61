//! Failures of the revision loop.

use thiserror::Error;

use redraft_core::{CandidateFlag, ProtectedSpan};
use redraft_providers::ProviderError;

/// Reasons a revision produced no result.
///
/// The variant reflects the last attempt: a request whose final candidate
/// dropped a span fails with [`RevisionError::LockViolation`] even if earlier
/// attempts failed for other reasons.
#[derive(Debug, Error)]
pub enum RevisionError {
    /// Every attempt dropped at least one protected span.
    #[error("{} protected span(s) missing after {attempts} attempt(s)", violations.len())]
    LockViolation {
        /// Attempts made.
        attempts: u32,
        /// Spans missing from the last candidate, in order.
        violations: Vec<ProtectedSpan>,
    },

    /// The last candidate was rejected by output screening.
    #[error("candidate rejected after {attempts} attempt(s): {flag}")]
    OutputFlagged {
        /// Attempts made.
        attempts: u32,
        /// Artefact found in the last candidate.
        flag: CandidateFlag,
    },

    /// The last provider call failed.
    #[error("provider failed after {attempts} attempt(s): {source}")]
    Provider {
        /// Attempts made.
        attempts: u32,
        /// Error from the last call.
        #[source]
        source: ProviderError,
    },

    /// The request ran out of wall-clock time.
    #[error("revision timed out after {attempts} attempt(s) ({budget_ms}ms budget)")]
    Timeout {
        /// Attempts made.
        attempts: u32,
        /// Budget in milliseconds.
        budget_ms: u64,
    },
}

impl RevisionError {
    /// Number of provider calls made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::LockViolation { attempts, .. }
            | Self::OutputFlagged { attempts, .. }
            | Self::Provider { attempts, .. }
            | Self::Timeout { attempts, .. } => *attempts,
        }
    }

    /// Returns true when the request ran out of time, either on its own
    /// budget or inside the last provider call.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Provider { source, .. } => source.is_timeout(),
            Self::LockViolation { .. } | Self::OutputFlagged { .. } => false,
        }
    }
}
