//! Case-insensitive keep-term matching over character offsets.

use std::ops::Range;

/// Finds non-overlapping occurrences of the terms, scanning left to right and
/// trying longer terms first at each position. Ranges are character offsets.
pub(super) fn find(chars: &[char], terms: &[String]) -> Vec<Range<usize>> {
    let mut patterns: Vec<Vec<char>> = terms
        .iter()
        .map(|term| term.chars().collect::<Vec<char>>())
        .filter(|pattern| !pattern.is_empty())
        .collect();
    patterns.sort_by(|left, right| right.len().cmp(&left.len()));

    let mut found = Vec::new();
    let mut cursor = 0;
    while cursor < chars.len() {
        let hit = patterns
            .iter()
            .find(|pattern| matches_at(chars, cursor, pattern));
        match hit {
            Some(pattern) => {
                found.push(cursor..cursor + pattern.len());
                cursor += pattern.len();
            }
            None => cursor += 1,
        }
    }
    found
}

fn matches_at(chars: &[char], at: usize, pattern: &[char]) -> bool {
    let Some(window) = chars.get(at..at + pattern.len()) else {
        return false;
    };
    window
        .iter()
        .zip(pattern)
        .all(|(left, right)| same_ignoring_case(*left, *right))
}

fn same_ignoring_case(left: char, right: char) -> bool {
    left == right || left.to_lowercase().eq(right.to_lowercase())
}
