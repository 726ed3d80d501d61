//! Citation recognisers.
//!
//! Recognised forms:
//!
//! - parenthetical author-year: `(Smith, 2020)`, `(Smith & Lee, 2019, p. 4)`,
//!   `(Smith et al., 2021; Doe, 2018)`
//! - narrative author-year: `Smith (2020)`, `Smith and Lee (2019, pp. 3-5)`
//! - numeric brackets: `[1]`, `[1, 2]`, `[3-5]`
//! - a quoted passage directly followed by one of the markers above

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

const AUTHOR: &str = r"[A-Z][\p{L}'’\-]+";
const YEAR: &str = r"(?:\d{4}[a-z]?|n\.d\.)";
const PAGES: &str = r"(?:,\s*(?:pp?\.\s*)?\d+(?:\s*[-–]\s*\d+)?)?";
const NUMERIC: &str = r"\[\d+(?:\s*[-–,]\s*\d+)*\]";

fn authors() -> String {
    format!(r"{AUTHOR}(?:\s+(?:et\s+al\.|(?:and|&)\s+{AUTHOR}))?")
}

fn parenthetical() -> String {
    let entry = format!(r"{authors},?\s+{YEAR}{PAGES}", authors = authors());
    format!(r"\((?:(?:see|cf\.|e\.g\.,?)\s+)?{entry}(?:;\s*{entry})*\)")
}

fn narrative() -> String {
    format!(r"\b{authors}\s+\({YEAR}{PAGES}\)", authors = authors())
}

#[expect(clippy::expect_used, reason = "patterns are constants exercised by tests")]
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(&parenthetical()).expect("valid parenthetical citation pattern"));

#[expect(clippy::expect_used, reason = "patterns are constants exercised by tests")]
static NARRATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&narrative()).expect("valid narrative citation pattern"));

#[expect(clippy::expect_used, reason = "patterns are constants exercised by tests")]
static NUMERIC_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMERIC).expect("valid numeric citation pattern"));

#[expect(clippy::expect_used, reason = "patterns are constants exercised by tests")]
static QUOTED_PASSAGE: Lazy<Regex> = Lazy::new(|| {
    let marker = format!(
        "(?:{paren}|{numeric})",
        paren = parenthetical(),
        numeric = NUMERIC
    );
    let pattern = format!(r#"(?:"[^"\n]+"|“[^”\n]+”)\s*{marker}"#);
    Regex::new(&pattern).expect("valid quoted passage pattern")
});

/// Returns the byte ranges of every citation candidate, possibly
/// overlapping, in no particular order.
pub(super) fn find(text: &str) -> Vec<Range<usize>> {
    [&*PARENTHETICAL, &*NARRATIVE, &*NUMERIC_BRACKET, &*QUOTED_PASSAGE]
        .into_iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|found| found.range()))
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn matched(text: &str) -> Vec<&str> {
        let mut ranges = find(text);
        ranges.sort_by_key(|range| (range.start, range.end));
        ranges
            .into_iter()
            .filter_map(|range| text.get(range))
            .collect()
    }

    #[rstest]
    #[case("as shown (Smith, 2020).", "(Smith, 2020)")]
    #[case("see (Smith & Lee, 2019, p. 4)", "(Smith & Lee, 2019, p. 4)")]
    #[case("(Smith et al., 2021; Doe, 2018) agree", "(Smith et al., 2021; Doe, 2018)")]
    #[case("(see Brown 2003a)", "(see Brown 2003a)")]
    #[case("as reported [1].", "[1]")]
    #[case("prior work [1, 2] and [3-5]", "[1, 2]")]
    #[case("Smith (2020) argues", "Smith (2020)")]
    #[case("Smith and Lee (2019, pp. 3-5) argue", "Smith and Lee (2019, pp. 3-5)")]
    fn recognises_citation_forms(#[case] text: &str, #[case] expected: &str) {
        assert!(
            matched(text).contains(&expected),
            "expected {expected:?} in {:?}",
            matched(text)
        );
    }

    #[test]
    fn quoted_passage_with_marker_is_one_candidate() {
        let text = "He wrote \"language is a virus\" (Burroughs, 1962) once.";
        assert!(matched(text).contains(&"\"language is a virus\" (Burroughs, 1962)"));
    }

    #[rstest]
    #[case("We met in 2020 (briefly).")]
    #[case("An array [a] of items.")]
    #[case("\"Quoted\" without a marker.")]
    fn ignores_non_citations(#[case] text: &str) {
        assert!(matched(text).is_empty(), "unexpected {:?}", matched(text));
    }
}
