//! Revision orchestration.
//!
//! [`Orchestrator::revise`] screens a request, extracts its protected spans,
//! and asks the provider for candidates until one reproduces every span and
//! passes output screening. The loop is bounded by an attempt count and a
//! wall-clock budget; a candidate known to drop a span is never returned.

mod assembly;
mod errors;
mod state;

use std::time::Duration;

use tracing::{debug, info, warn};

use redraft_core::{
    GuardrailVerdict, LockOptions, MetricsEngine, ProtectedSpan, RevisionRequest, RevisionResult,
    classify_request, extract, inspect_candidate, missing_spans,
};
use redraft_providers::{RewriteDirective, RewriteProvider};

pub use self::errors::RevisionError;
use self::state::{AttemptFailure, AttemptState, Deadline};

const REVISION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::revision");

/// Default provider calls per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wall-clock budget per request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Bounds applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionPolicy {
    max_attempts: u32,
    timeout: Duration,
}

impl RevisionPolicy {
    /// Creates a policy; `max_attempts` is raised to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            timeout,
        }
    }

    /// Provider calls allowed per request.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wall-clock budget per request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for RevisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT)
    }
}

/// Successful outcomes of [`Orchestrator::revise`].
#[derive(Debug, Clone, PartialEq)]
pub enum RevisionOutcome {
    /// A verified revision.
    Revised(Box<RevisionResult>),
    /// The request was refused before any provider call.
    Denied(GuardrailVerdict),
}

/// Coordinates screening, lock extraction, the provider, and assembly.
#[derive(Debug)]
pub struct Orchestrator<P> {
    provider: P,
    policy: RevisionPolicy,
    metrics: MetricsEngine,
}

impl<P> Orchestrator<P>
where
    P: RewriteProvider,
{
    /// Creates an orchestrator around `provider`.
    #[must_use]
    pub fn new(provider: P, policy: RevisionPolicy) -> Self {
        Self {
            provider,
            policy,
            metrics: MetricsEngine::default(),
        }
    }

    /// Replaces the metrics engine used during assembly.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: MetricsEngine) -> Self {
        self.metrics = metrics;
        self
    }

    /// The active bounds.
    #[must_use]
    pub const fn policy(&self) -> RevisionPolicy {
        self.policy
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Revises `request`.
    ///
    /// The request is assumed valid; callers check it with
    /// [`RevisionRequest::validate`] first.
    ///
    /// # Errors
    ///
    /// Returns a [`RevisionError`] describing the last attempt when no
    /// candidate could be accepted.
    pub fn revise(&self, request: &RevisionRequest) -> Result<RevisionOutcome, RevisionError> {
        let verdict = classify_request(request);
        if !verdict.allowed() {
            info!(
                target: REVISION_TARGET,
                reason = %verdict.reason_code(),
                "request refused by guardrail"
            );
            return Ok(RevisionOutcome::Denied(verdict));
        }

        let spans = extract(
            request.original_text(),
            LockOptions::from(request.controls()),
        );
        debug!(
            target: REVISION_TARGET,
            provider = self.provider.name(),
            protected_spans = spans.len(),
            "starting revision"
        );

        let base = RewriteDirective::new(
            request.controls(),
            spans.iter().map(|span| span.text().to_owned()).collect(),
        )
        .with_instructions(request.instructions());

        let (candidate, attempts) = self.run_attempts(request.original_text(), &spans, &base)?;
        info!(
            target: REVISION_TARGET,
            attempts,
            "revision accepted"
        );
        let result = assembly::assemble(
            &self.metrics,
            request.original_text(),
            candidate,
            spans,
            attempts,
        );
        Ok(RevisionOutcome::Revised(Box::new(result)))
    }

    fn run_attempts(
        &self,
        original: &str,
        spans: &[ProtectedSpan],
        base: &RewriteDirective,
    ) -> Result<(String, u32), RevisionError> {
        let deadline = Deadline::start(self.policy.timeout);
        let mut state = AttemptState::Pending;
        loop {
            state = match state {
                AttemptState::Pending => AttemptState::Attempting {
                    attempt: 1,
                    directive: base.clone(),
                },
                AttemptState::Attempting { attempt, directive } => {
                    self.attempt(original, spans, attempt, directive, &deadline)
                }
                AttemptState::Retrying { attempt, failure } => {
                    warn!(
                        target: REVISION_TARGET,
                        attempt,
                        failure = failure.label(),
                        "attempt rejected"
                    );
                    if attempt >= self.policy.max_attempts {
                        AttemptState::Failed(failure.into_error(attempt))
                    } else if deadline.expired() {
                        AttemptState::Failed(deadline.timeout(attempt))
                    } else {
                        AttemptState::Attempting {
                            attempt: attempt + 1,
                            directive: failure
                                .reinforce(base.clone())
                                .with_attempt(attempt + 1),
                        }
                    }
                }
                AttemptState::Valid { attempt, candidate } => return Ok((candidate, attempt)),
                AttemptState::Failed(error) => return Err(error),
            };
        }
    }

    fn attempt(
        &self,
        original: &str,
        spans: &[ProtectedSpan],
        attempt: u32,
        planned: RewriteDirective,
        deadline: &Deadline,
    ) -> AttemptState {
        if deadline.expired() {
            return AttemptState::Failed(deadline.timeout(attempt.saturating_sub(1)));
        }
        let directive = planned.with_time_budget(deadline.remaining());
        debug!(
            target: REVISION_TARGET,
            attempt,
            budget_ms = u64::try_from(directive.time_budget().as_millis()).unwrap_or(u64::MAX),
            "requesting candidate"
        );

        let outcome = self.provider.rewrite(original, &directive);
        if deadline.expired() {
            return AttemptState::Failed(deadline.timeout(attempt));
        }
        let candidate = match outcome {
            Ok(candidate) => candidate,
            Err(error) => {
                return AttemptState::Retrying {
                    attempt,
                    failure: AttemptFailure::Provider(error),
                };
            }
        };

        let violations = missing_spans(&candidate, spans);
        if !violations.is_empty() {
            return AttemptState::Retrying {
                attempt,
                failure: AttemptFailure::Violations(violations),
            };
        }
        if let Some(flag) = inspect_candidate(original, &candidate) {
            return AttemptState::Retrying {
                attempt,
                failure: AttemptFailure::Flagged(flag),
            };
        }
        AttemptState::Valid { attempt, candidate }
    }
}
