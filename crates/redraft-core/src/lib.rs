//! Pure engines and data model for the redraft text-revision service.
//!
//! Nothing in this crate performs I/O. The daemon composes these pieces
//! around a rewriting provider:
//!
//! - [`classify`] screens requests for integrity-evasion intent and
//!   [`inspect_candidate`] screens provider output
//! - [`extract`] finds the citations and keep terms a revision must keep
//! - [`analyze`] measures readability and style
//! - [`diff`] and [`diff_text`] build a token-level edit script
//!
//! # Example
//!
//! ```
//! use redraft_core::{Controls, LockOptions, RevisionRequest, analyze, classify, extract};
//!
//! let request = RevisionRequest::new("Results held (Smith, 2020).", Controls::default());
//! assert!(classify(request.original_text(), request.instructions()).allowed());
//!
//! let spans = extract(request.original_text(), LockOptions::from(request.controls()));
//! assert_eq!(spans[0].text(), "(Smith, 2020)");
//!
//! let metrics = analyze(request.original_text());
//! assert_eq!(metrics.sentence_lengths, vec![4]);
//! ```

mod diff;
mod guardrail;
mod locks;
mod metrics;
mod request;
mod result;
mod span;
pub mod tokenize;

pub use diff::{DiffKind, DiffOp, diff, diff_text};
pub use guardrail::{
    CandidateFlag, GuardrailVerdict, REFUSAL_MESSAGE, ReasonCode, classify, classify_request,
    inspect_candidate,
};
pub use locks::{LockOptions, extract, missing_spans};
pub use metrics::{
    DEFAULT_PASSIVE_WINDOW, MetricsConfig, MetricsEngine, MetricsResult, READABILITY_BASELINE,
    analyze,
};
pub use request::{Controls, KeepTerms, Level, RequestError, RevisionRequest};
pub use result::{MetricsComparison, RevisionResult};
pub use span::{ProtectedSpan, SpanKind};

#[cfg(test)]
mod tests;
