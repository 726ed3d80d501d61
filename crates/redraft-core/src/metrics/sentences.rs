//! Sentence segmentation.
//!
//! A sentence ends at a run of `.`, `!`, or `?` (optionally followed by
//! closing quotes or brackets) that is followed by whitespace or the end of
//! the text. Segments that contain no words are discarded, so stray
//! punctuation never counts as a sentence.

use crate::tokenize;

/// Splits text into sentences, each returned with its word tokens.
pub(crate) fn sentences(text: &str) -> Vec<Vec<&str>> {
    segments(text)
        .into_iter()
        .map(tokenize::words)
        .filter(|words| !words.is_empty())
        .collect()
}

fn segments(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut found = Vec::new();
    let mut segment_start = 0;
    let mut cursor = 0;
    while let Some(&(_, ch)) = chars.get(cursor) {
        if !is_terminal(ch) {
            cursor += 1;
            continue;
        }
        let mut after = cursor;
        while chars.get(after).is_some_and(|&(_, next)| is_terminal(next)) {
            after += 1;
        }
        while chars.get(after).is_some_and(|&(_, next)| is_closer(next)) {
            after += 1;
        }
        let boundary = match chars.get(after) {
            None => Some(text.len()),
            Some(&(offset, next)) if next.is_whitespace() => Some(offset),
            Some(_) => None,
        };
        if let Some(end) = boundary {
            if let Some(segment) = text.get(segment_start..end) {
                found.push(segment);
            }
            segment_start = end;
        }
        cursor = after;
    }
    if let Some(tail) = text.get(segment_start..)
        && !tail.is_empty()
    {
        found.push(tail);
    }
    found
}

const fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

const fn is_closer(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}'
    )
}
