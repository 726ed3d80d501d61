//! The assembled outcome of a successful revision.

use serde::{Deserialize, Serialize};

use crate::diff::DiffOp;
use crate::metrics::MetricsResult;
use crate::span::ProtectedSpan;

/// Metrics for the original and revised texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsComparison {
    /// Metrics of the submitted text.
    pub original: MetricsResult,
    /// Metrics of the accepted revision.
    pub revised: MetricsResult,
}

/// A validated revision together with everything derived from it.
///
/// Only built from a candidate that reproduced every protected span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionResult {
    /// The accepted revision.
    pub revised_text: String,
    /// Ordered descriptions of notable changes.
    pub notes: Vec<String>,
    /// One-line summary of the revision.
    pub summary: String,
    /// Metrics for both texts.
    pub metrics: MetricsComparison,
    /// Token-level edit script from original to revision.
    pub diff: Vec<DiffOp>,
    /// Spans that were required to survive.
    pub protected_spans: Vec<ProtectedSpan>,
    /// Provider calls made, including the accepted one.
    pub attempts: u32,
}
