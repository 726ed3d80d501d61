//! Building the result for an accepted candidate.

use redraft_core::{
    DiffKind, DiffOp, MetricsComparison, MetricsEngine, ProtectedSpan,
    RevisionResult, diff_text,
};

/// Assembles the full result for a candidate that passed verification.
pub(super) fn assemble(
    engine: &MetricsEngine,
    original: &str,
    candidate: String,
    protected_spans: Vec<ProtectedSpan>,
    attempts: u32,
) -> RevisionResult {
    let metrics = MetricsComparison {
        original: engine.analyze(original),
        revised: engine.analyze(&candidate),
    };
    let diff = diff_text(original, &candidate);
    let changes = EditCounts::from_ops(&diff);
    let notes = notes(&metrics, &changes, protected_spans.len(), attempts);
    let summary = summary(&metrics, &changes);

    RevisionResult {
        revised_text: candidate,
        notes,
        summary,
        metrics,
        diff,
        protected_spans,
        attempts,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct EditCounts {
    passages: usize,
    removed: usize,
    added: usize,
}

impl EditCounts {
    fn from_ops(ops: &[DiffOp]) -> Self {
        let mut counts = Self::default();
        let mut in_change = false;
        for op in ops {
            match op.kind {
                DiffKind::Equal => in_change = false,
                DiffKind::Delete | DiffKind::Insert => {
                    if !in_change {
                        counts.passages += 1;
                        in_change = true;
                    }
                    if op.kind == DiffKind::Delete {
                        counts.removed += op.word_count();
                    } else {
                        counts.added += op.word_count();
                    }
                }
            }
        }
        counts
    }

    const fn is_unchanged(&self) -> bool {
        self.passages == 0
    }
}

fn notes(
    metrics: &MetricsComparison,
    changes: &EditCounts,
    protected: usize,
    attempts: u32,
) -> Vec<String> {
    let MetricsComparison { original, revised } = metrics;
    let mut notes = Vec::new();

    if changes.is_unchanged() {
        notes.push(String::from("No wording changes were needed."));
    } else {
        notes.push(format!(
            "Edited {} {}: {} word(s) removed, {} added.",
            changes.passages,
            plural(changes.passages, "passage", "passages"),
            changes.removed,
            changes.added
        ));
    }

    if let Some(note) = shift(
        "Readability",
        one_decimal(original.readability),
        one_decimal(revised.readability),
    ) {
        notes.push(note);
    }
    if let Some(note) = shift(
        "Sentence count",
        original.sentence_lengths.len().to_string(),
        revised.sentence_lengths.len().to_string(),
    ) {
        notes.push(note);
    }
    if let Some(note) = trend(
        "Sentence-length variance",
        original.length_variance,
        revised.length_variance,
    ) {
        notes.push(note);
    }
    if let Some(note) = shift(
        "Repetition ratio",
        two_decimals(original.repetition_ratio),
        two_decimals(revised.repetition_ratio),
    ) {
        notes.push(note);
    }
    if let Some(note) = shift(
        "Word count",
        original.word_count().to_string(),
        revised.word_count().to_string(),
    ) {
        notes.push(note);
    }
    if let Some(note) = shift(
        "Passive sentences",
        percent(original.passive_pct),
        percent(revised.passive_pct),
    ) {
        notes.push(note);
    }
    if let Some(note) = shift(
        "Lexical diversity",
        two_decimals(original.lexical_diversity),
        two_decimals(revised.lexical_diversity),
    ) {
        notes.push(note);
    }

    if protected > 0 {
        notes.push(format!(
            "Kept {protected} protected {} verbatim.",
            plural(protected, "span", "spans")
        ));
    }
    if attempts > 1 {
        notes.push(format!(
            "Accepted on attempt {attempts} after earlier drafts were rejected."
        ));
    }
    notes
}

fn summary(metrics: &MetricsComparison, changes: &EditCounts) -> String {
    if changes.is_unchanged() {
        return String::from("No changes: the text already met the requested style.");
    }
    format!(
        "Revised {} {}; readability {} to {}.",
        changes.passages,
        plural(changes.passages, "passage", "passages"),
        one_decimal(metrics.original.readability),
        one_decimal(metrics.revised.readability)
    )
}

/// Describes a change between two rendered values, if they differ.
fn shift(label: &str, before: String, after: String) -> Option<String> {
    (before != after).then(|| format!("{label} changed from {before} to {after}."))
}

/// Like [`shift`], but says which way the value moved.
fn trend(label: &str, before: f64, after: f64) -> Option<String> {
    let (from, to) = (one_decimal(before), one_decimal(after));
    if from == to {
        return None;
    }
    let direction = if after > before { "increased" } else { "decreased" };
    Some(format!("{label} {direction} from {from} to {to}."))
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

fn percent(value: f64) -> String {
    format!("{value:.0}%")
}

const fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
