//! States of the bounded attempt loop.

use std::time::{Duration, Instant};

use redraft_core::{CandidateFlag, ProtectedSpan};
use redraft_providers::{ProviderError, RewriteDirective};

use super::errors::RevisionError;

/// Position of a request in the attempt loop.
///
/// `Pending` moves to `Attempting`; an attempt ends `Valid`, `Retrying`, or
/// `Failed`; `Retrying` moves back to `Attempting` until the attempt bound or
/// the deadline is reached.
#[derive(Debug)]
pub(super) enum AttemptState {
    Pending,
    Attempting {
        attempt: u32,
        directive: RewriteDirective,
    },
    Retrying {
        attempt: u32,
        failure: AttemptFailure,
    },
    Valid {
        attempt: u32,
        candidate: String,
    },
    Failed(RevisionError),
}

/// Why one attempt produced no usable candidate.
#[derive(Debug)]
pub(super) enum AttemptFailure {
    Violations(Vec<ProtectedSpan>),
    Flagged(CandidateFlag),
    Provider(ProviderError),
}

impl AttemptFailure {
    pub(super) fn into_error(self, attempts: u32) -> RevisionError {
        match self {
            Self::Violations(violations) => RevisionError::LockViolation {
                attempts,
                violations,
            },
            Self::Flagged(flag) => RevisionError::OutputFlagged { attempts, flag },
            Self::Provider(source) => RevisionError::Provider { attempts, source },
        }
    }

    /// Strengthens `base` for the next attempt.
    pub(super) fn reinforce(&self, base: RewriteDirective) -> RewriteDirective {
        match self {
            Self::Violations(violations) => base.with_reinforcement(
                violations
                    .iter()
                    .map(|span| span.text().to_owned())
                    .collect(),
            ),
            Self::Flagged(flag) => base.with_output_flag(flag.to_string()),
            Self::Provider(_) => base,
        }
    }

    pub(super) const fn label(&self) -> &'static str {
        match self {
            Self::Violations(_) => "lock_violation",
            Self::Flagged(_) => "output_flagged",
            Self::Provider(_) => "provider_error",
        }
    }
}

/// Wall-clock allowance shared by every attempt of one request.
#[derive(Debug, Clone, Copy)]
pub(super) struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub(super) fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub(super) fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    pub(super) fn expired(&self) -> bool {
        self.remaining().is_zero()
    }

    pub(super) fn timeout(&self, attempts: u32) -> RevisionError {
        RevisionError::Timeout {
            attempts,
            budget_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
