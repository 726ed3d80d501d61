//! Tests for the LCS diff engine.

use rstest::rstest;

use crate::{DiffKind, DiffOp, diff, diff_text};

fn rebuild(ops: &[DiffOp], skip: DiffKind) -> String {
    ops.iter()
        .filter(|op| op.kind != skip)
        .flat_map(|op| op.tokens.iter().map(String::as_str))
        .collect()
}

fn kinds(ops: &[DiffOp]) -> Vec<DiffKind> {
    ops.iter().map(|op| op.kind).collect()
}

#[rstest]
#[case("The cat sat.", "The cat sat.")]
#[case("The cat sat.", "A dog sat down.")]
#[case("", "Entirely new text.")]
#[case("Removed completely.", "")]
#[case("a b a b a", "b a b")]
#[case("Results (Smith, 2020) hold.", "The results hold (Smith, 2020), clearly.")]
fn reconstructs_both_texts(#[case] original: &str, #[case] revised: &str) {
    let ops = diff_text(original, revised);
    assert_eq!(rebuild(&ops, DiffKind::Delete), revised);
    assert_eq!(rebuild(&ops, DiffKind::Insert), original);
}

#[test]
fn identical_sequences_are_one_equal_run() {
    let ops = diff(&["x", "y"], &["x", "y"]);
    assert_eq!(kinds(&ops), vec![DiffKind::Equal]);
}

#[test]
fn empty_inputs_produce_no_ops() {
    let empty: [&str; 0] = [];
    assert!(diff(&empty, &empty).is_empty());
}

#[test]
fn equal_tokens_align_at_the_earliest_position() {
    let ops = diff(&["a"], &["a", "a"]);
    assert_eq!(kinds(&ops), vec![DiffKind::Equal, DiffKind::Insert]);
}

#[test]
fn shared_tail_does_not_push_matches_later() {
    let ops = diff(&["x", "a"], &["a", "y", "a"]);
    assert_eq!(
        kinds(&ops),
        vec![DiffKind::Delete, DiffKind::Equal, DiffKind::Insert]
    );
    assert_eq!(ops[2].tokens, vec!["y", "a"]);
}

#[test]
fn deletions_precede_insertions_on_ties() {
    let ops = diff(&["a", "b"], &["c", "d"]);
    assert_eq!(kinds(&ops), vec![DiffKind::Delete, DiffKind::Insert]);
    assert_eq!(ops[0].tokens, vec!["a", "b"]);
}

#[test]
fn edit_script_is_minimal() {
    let ops = diff(&["a", "b", "c", "d"], &["a", "c", "d", "e"]);
    let edits: usize = ops
        .iter()
        .filter(|op| op.kind != DiffKind::Equal)
        .map(|op| op.tokens.len())
        .sum();
    assert_eq!(edits, 2);
}

#[test]
fn word_count_ignores_whitespace_and_punctuation() {
    let ops = diff_text("", "Hello, big world!");
    assert_eq!(ops[0].word_count(), 3);
}
