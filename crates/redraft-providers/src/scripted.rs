//! Deterministic provider for tests.
//!
//! A [`ScriptedProvider`] replays a queue of [`ScriptedReply`] values, one
//! per call, and records every call it receives.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::directive::RewriteDirective;
use crate::error::ProviderError;
use crate::provider::RewriteProvider;

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Return this candidate text.
    Text(String),
    /// Return the input unchanged.
    Echo,
    /// Return the candidate text after sleeping.
    Slow {
        /// Time to sleep before answering.
        delay: Duration,
        /// Candidate text.
        text: String,
    },
    /// Decline with the given reason.
    Reject(String),
    /// Fail as if the call ran out of time.
    Timeout,
}

impl ScriptedReply {
    /// Shorthand for [`ScriptedReply::Text`].
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A call received by a [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Text passed to the provider.
    pub text: String,
    /// Directive passed to the provider.
    pub directive: RewriteDirective,
}

/// Replays queued replies in order.
///
/// Once the queue is empty every further call fails with
/// [`ProviderError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    /// Creates a provider that answers with `replies` in order.
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends a reply to the queue.
    pub fn push(&self, reply: ScriptedReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RewriteProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn rewrite(&self, text: &str, directive: &RewriteDirective) -> Result<String, ProviderError> {
        lock(&self.calls).push(RecordedCall {
            text: text.to_owned(),
            directive: directive.clone(),
        });
        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(ScriptedReply::Text(candidate)) => Ok(candidate),
            Some(ScriptedReply::Echo) => Ok(text.to_owned()),
            Some(ScriptedReply::Slow { delay, text: candidate }) => {
                thread::sleep(delay);
                Ok(candidate)
            }
            Some(ScriptedReply::Reject(message)) => Err(ProviderError::Rejected {
                name: self.name().to_owned(),
                message,
            }),
            Some(ScriptedReply::Timeout) => Err(ProviderError::Timeout {
                name: self.name().to_owned(),
                timeout_ms: u64::try_from(directive.time_budget().as_millis())
                    .unwrap_or(u64::MAX),
            }),
            None => Err(ProviderError::Unavailable {
                message: String::from("scripted replies exhausted"),
            }),
        }
    }
}
