//! Word and diff tokenisation shared by the metrics and diff engines.
//!
//! A word is a maximal run of alphanumeric characters. An apostrophe (`'` or
//! `’`) stays inside a word when alphanumerics sit on both sides of it, so
//! `don't` and `O’Brien` are single words. Diff tokens additionally keep
//! whitespace runs and single punctuation characters so that concatenating
//! the tokens of a text reproduces it exactly.

/// Splits text into word tokens.
///
/// # Example
///
/// ```
/// use redraft_core::tokenize::words;
///
/// assert_eq!(words("It's a test, isn't it?"), vec!["It's", "a", "test", "isn't", "it"]);
/// ```
#[must_use]
pub fn words(text: &str) -> Vec<&str> {
    tokens(text)
        .into_iter()
        .filter(|token| is_word(token))
        .collect()
}

/// Splits text into diff tokens: words, whitespace runs, and single
/// punctuation characters.
///
/// # Example
///
/// ```
/// use redraft_core::tokenize::tokens;
///
/// let parts = tokens("Hi,  there!");
/// assert_eq!(parts, vec!["Hi", ",", "  ", "there", "!"]);
/// assert_eq!(parts.concat(), "Hi,  there!");
/// ```
#[must_use]
pub fn tokens(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(&(start, ch)) = chars.get(cursor) {
        let next = if ch.is_alphanumeric() {
            scan_word(&chars, cursor)
        } else if ch.is_whitespace() {
            scan_whitespace(&chars, cursor)
        } else {
            cursor + 1
        };
        let end = chars.get(next).map_or(text.len(), |&(offset, _)| offset);
        if let Some(token) = text.get(start..end) {
            found.push(token);
        }
        cursor = next;
    }
    found
}

/// Returns true when the token starts with an alphanumeric character.
#[must_use]
pub fn is_word(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphanumeric)
}

/// Returns true for the apostrophes that may join word parts.
#[must_use]
pub const fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

fn scan_word(chars: &[(usize, char)], from: usize) -> usize {
    let mut cursor = from;
    while let Some(&(_, ch)) = chars.get(cursor) {
        if ch.is_alphanumeric() {
            cursor += 1;
            continue;
        }
        let joins = is_apostrophe(ch)
            && chars
                .get(cursor + 1)
                .is_some_and(|&(_, next)| next.is_alphanumeric());
        if !joins {
            break;
        }
        cursor += 1;
    }
    cursor
}

fn scan_whitespace(chars: &[(usize, char)], from: usize) -> usize {
    let mut cursor = from;
    while chars
        .get(cursor)
        .is_some_and(|&(_, ch)| ch.is_whitespace())
    {
        cursor += 1;
    }
    cursor
}
