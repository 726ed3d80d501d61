//! Lock extraction: finding the spans a revision must reproduce verbatim.
//!
//! Citations are recognised only when citation locking is on. Keep terms
//! are matched case-insensitively. Overlapping candidates are merged into
//! their union; a merged span is a citation when any of its parts was one.
//! The result is sorted by start offset and free of overlaps.

mod citations;
mod terms;

use std::ops::Range;

use crate::request::{Controls, KeepTerms};
use crate::span::{ProtectedSpan, SpanKind};

/// Inputs to [`extract`].
#[derive(Debug, Clone, Copy)]
pub struct LockOptions<'a> {
    /// Whether citations are protected.
    pub lock_citations: bool,
    /// Terms to protect.
    pub keep_terms: &'a KeepTerms,
}

impl<'a> From<&'a Controls> for LockOptions<'a> {
    fn from(controls: &'a Controls) -> Self {
        Self {
            lock_citations: controls.lock_citations,
            keep_terms: &controls.keep_terms,
        }
    }
}

/// Extracts protected spans from `text`.
///
/// # Example
///
/// ```
/// use redraft_core::{KeepTerms, LockOptions, SpanKind, extract};
///
/// let terms = KeepTerms::new(["neural network"]);
/// let options = LockOptions { lock_citations: false, keep_terms: &terms };
/// let spans = extract("A neural network learns.", options);
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].kind(), SpanKind::LockedTerm);
/// assert_eq!(spans[0].text(), "neural network");
/// ```
#[must_use]
pub fn extract(text: &str, options: LockOptions<'_>) -> Vec<ProtectedSpan> {
    let chars: Vec<char> = text.chars().collect();
    let mut candidates: Vec<(Range<usize>, SpanKind)> = Vec::new();

    if options.lock_citations {
        let offsets = CharOffsets::new(text);
        candidates.extend(
            citations::find(text)
                .into_iter()
                .map(|bytes| (offsets.to_chars(&bytes), SpanKind::Citation)),
        );
    }
    candidates.extend(
        terms::find(&chars, options.keep_terms.as_slice())
            .into_iter()
            .map(|range| (range, SpanKind::LockedTerm)),
    );

    merge(candidates)
        .into_iter()
        .map(|(range, kind)| {
            let covered: String = chars.get(range.clone()).unwrap_or_default().iter().collect();
            ProtectedSpan::new(range.start, range.end, kind, covered)
        })
        .collect()
}

/// Returns the spans whose exact text is absent from `candidate`, in order.
#[must_use]
pub fn missing_spans(candidate: &str, spans: &[ProtectedSpan]) -> Vec<ProtectedSpan> {
    spans
        .iter()
        .filter(|span| !span.survives_in(candidate))
        .cloned()
        .collect()
}

fn merge(mut candidates: Vec<(Range<usize>, SpanKind)>) -> Vec<(Range<usize>, SpanKind)> {
    candidates.retain(|(range, _)| !range.is_empty());
    candidates.sort_by(|(left, _), (right, _)| {
        left.start
            .cmp(&right.start)
            .then_with(|| right.end.cmp(&left.end))
    });

    let mut merged: Vec<(Range<usize>, SpanKind)> = Vec::new();
    for (range, kind) in candidates {
        match merged.last_mut() {
            Some((current, current_kind)) if range.start < current.end => {
                current.end = current.end.max(range.end);
                *current_kind = current_kind.merge(kind);
            }
            _ => merged.push((range, kind)),
        }
    }
    merged
}

/// Maps byte offsets produced by regex matches onto character offsets.
struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(offset, _)| offset).collect(),
        }
    }

    fn to_chars(&self, bytes: &Range<usize>) -> Range<usize> {
        self.position(bytes.start)..self.position(bytes.end)
    }

    fn position(&self, byte: usize) -> usize {
        self.starts.partition_point(|start| *start < byte)
    }
}
