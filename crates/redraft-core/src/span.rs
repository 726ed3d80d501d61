//! Protected span types produced by lock extraction.

use serde::{Deserialize, Serialize};

/// Why a span is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    /// A bibliographic reference marker or a quoted passage with one.
    Citation,
    /// A user-designated keep term.
    LockedTerm,
}

impl SpanKind {
    /// Returns the kind that wins when two overlapping spans are merged.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::LockedTerm, Self::LockedTerm) => Self::LockedTerm,
            _ => Self::Citation,
        }
    }
}

/// A region of the original text that must survive revision byte-exact.
///
/// Offsets count Unicode scalar values (characters), not bytes, and form a
/// half-open range: `start` is inclusive and `end` is exclusive.
///
/// # Example
///
/// ```
/// use redraft_core::{ProtectedSpan, SpanKind};
///
/// let span = ProtectedSpan::new(4, 18, SpanKind::LockedTerm, "neural network");
/// assert_eq!(span.len(), 14);
/// assert!(span.survives_in("A neural network learns."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtectedSpan {
    start: usize,
    end: usize,
    kind: SpanKind,
    text: String,
}

impl ProtectedSpan {
    /// Creates a span.
    #[must_use]
    pub fn new(start: usize, end: usize, kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind,
            text: text.into(),
        }
    }

    /// Inclusive start offset in characters.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset in characters.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for a zero-width span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of protection.
    #[must_use]
    pub const fn kind(&self) -> SpanKind {
        self.kind
    }

    /// Exact protected text.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns true when the protected text occurs verbatim in `candidate`.
    #[must_use]
    pub fn survives_in(&self, candidate: &str) -> bool {
        candidate.contains(self.text.as_str())
    }
}
