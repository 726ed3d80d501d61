//! Token-level diff based on the longest common subsequence.
//!
//! The edit script is minimal and deterministic. When the heads of both
//! sequences match they are always emitted as `Equal`, so equal tokens are
//! aligned at the earliest position. When a deletion and an insertion are
//! equally good the deletion comes first. Consecutive operations of the same
//! kind are coalesced.
//!
//! Concatenating the tokens of `Equal` and `Insert` operations rebuilds the
//! revised sequence; `Equal` and `Delete` rebuild the original.

use serde::{Deserialize, Serialize};

use crate::tokenize;

/// Kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffKind {
    /// Tokens present in both sequences.
    Equal,
    /// Tokens only present in the revised sequence.
    Insert,
    /// Tokens only present in the original sequence.
    Delete,
}

/// One run of tokens sharing an edit kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    /// Edit kind.
    pub kind: DiffKind,
    /// Tokens covered, in order.
    pub tokens: Vec<String>,
}

impl DiffOp {
    /// Number of word tokens in this operation, ignoring whitespace and
    /// punctuation.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| tokenize::is_word(token))
            .count()
    }
}

/// Diffs two token sequences.
///
/// # Example
///
/// ```
/// use redraft_core::{DiffKind, diff};
///
/// let ops = diff(&["a", "b", "c"], &["a", "x", "c"]);
/// let kinds: Vec<DiffKind> = ops.iter().map(|op| op.kind).collect();
/// assert_eq!(kinds, vec![DiffKind::Equal, DiffKind::Delete, DiffKind::Insert, DiffKind::Equal]);
/// ```
#[must_use]
pub fn diff<T: AsRef<str>>(original: &[T], revised: &[T]) -> Vec<DiffOp> {
    let before: Vec<&str> = original.iter().map(AsRef::as_ref).collect();
    let after: Vec<&str> = revised.iter().map(AsRef::as_ref).collect();

    let prefix = before
        .iter()
        .zip(&after)
        .take_while(|(left, right)| left == right)
        .count();

    let mut script = Script::default();
    for token in before.iter().take(prefix) {
        script.push(DiffKind::Equal, token);
    }
    align(
        before.get(prefix..).unwrap_or_default(),
        after.get(prefix..).unwrap_or_default(),
        &mut script,
    );
    script.finish()
}

/// Tokenises both texts with [`tokenize::tokens`] and diffs them.
#[must_use]
pub fn diff_text(original: &str, revised: &str) -> Vec<DiffOp> {
    diff(&tokenize::tokens(original), &tokenize::tokens(revised))
}

fn align(before: &[&str], after: &[&str], script: &mut Script) {
    let table = LcsTable::build(before, after);
    let mut row = 0;
    let mut column = 0;
    while let (Some(left), Some(right)) = (before.get(row), after.get(column)) {
        if left == right {
            script.push(DiffKind::Equal, left);
            row += 1;
            column += 1;
        } else if table.at(row + 1, column) >= table.at(row, column + 1) {
            script.push(DiffKind::Delete, left);
            row += 1;
        } else {
            script.push(DiffKind::Insert, right);
            column += 1;
        }
    }
    for token in before.iter().skip(row) {
        script.push(DiffKind::Delete, token);
    }
    for token in after.iter().skip(column) {
        script.push(DiffKind::Insert, token);
    }
}

/// Suffix LCS lengths: `at(i, j)` is the LCS length of `before[i..]` and
/// `after[j..]`.
struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(before: &[&str], after: &[&str]) -> Self {
        let width = after.len() + 1;
        let mut table = Self {
            width,
            cells: vec![0; (before.len() + 1) * width],
        };
        for (row, left) in before.iter().enumerate().rev() {
            for (column, right) in after.iter().enumerate().rev() {
                let value = if left == right {
                    table.at(row + 1, column + 1).saturating_add(1)
                } else {
                    table.at(row + 1, column).max(table.at(row, column + 1))
                };
                if let Some(cell) = table.cells.get_mut(row * width + column) {
                    *cell = value;
                }
            }
        }
        table
    }

    fn at(&self, row: usize, column: usize) -> u32 {
        self.cells
            .get(row * self.width + column)
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Default)]
struct Script {
    ops: Vec<DiffOp>,
}

impl Script {
    fn push(&mut self, kind: DiffKind, token: &str) {
        match self.ops.last_mut() {
            Some(last) if last.kind == kind => last.tokens.push(token.to_owned()),
            _ => self.ops.push(DiffOp {
                kind,
                tokens: vec![token.to_owned()],
            }),
        }
    }

    fn finish(self) -> Vec<DiffOp> {
        self.ops
    }
}
