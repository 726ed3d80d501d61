//! Screening of provider output for detector-evasion artefacts.

use std::collections::HashSet;
use std::fmt;

use super::cues;
use super::meta;
use super::normalise::{is_invisible, normalise};
use super::verdict::ReasonCode;

/// Evasion artefact found in a candidate revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFlag {
    /// Zero-width or other invisible characters absent from the original.
    InvisibleCharacters,
    /// A new word mixing Latin letters with Cyrillic or Greek homoglyphs.
    MixedScript {
        /// The offending word.
        word: String,
    },
    /// Meta-text with evasion intent that the original did not contain.
    EvasionMetaText(ReasonCode),
}

impl CandidateFlag {
    /// The policy category the artefact belongs to.
    #[must_use]
    pub const fn reason_code(&self) -> ReasonCode {
        match self {
            Self::InvisibleCharacters | Self::MixedScript { .. } => ReasonCode::EvadeDetection,
            Self::EvasionMetaText(reason) => *reason,
        }
    }
}

impl fmt::Display for CandidateFlag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvisibleCharacters => formatter.write_str("invisible characters"),
            Self::MixedScript { word } => write!(formatter, "mixed-script word '{word}'"),
            Self::EvasionMetaText(reason) => write!(formatter, "meta-text flagged as {reason}"),
        }
    }
}

/// Checks a candidate revision for evasion artefacts introduced by the
/// provider. Artefacts already present in `original` are not reported.
///
/// # Example
///
/// ```
/// use redraft_core::{CandidateFlag, inspect_candidate};
///
/// assert_eq!(inspect_candidate("plain text", "plain text"), None);
/// assert_eq!(
///     inspect_candidate("plain text", "pla\u{200B}in text"),
///     Some(CandidateFlag::InvisibleCharacters)
/// );
/// ```
#[must_use]
pub fn inspect_candidate(original: &str, candidate: &str) -> Option<CandidateFlag> {
    if candidate
        .chars()
        .any(|ch| is_invisible(ch) && !original.contains(ch))
    {
        return Some(CandidateFlag::InvisibleCharacters);
    }
    if let Some(word) = new_mixed_script_word(original, candidate) {
        return Some(CandidateFlag::MixedScript { word });
    }
    meta::segments(candidate)
        .into_iter()
        .filter(|segment| !original.contains(segment.as_str()))
        .filter_map(|segment| cues::detect(&normalise(&segment)))
        .min()
        .map(CandidateFlag::EvasionMetaText)
}

fn new_mixed_script_word(original: &str, candidate: &str) -> Option<String> {
    let known: HashSet<&str> = original.split_whitespace().map(trim_word).collect();
    candidate
        .split_whitespace()
        .map(trim_word)
        .filter(|word| !known.contains(word))
        .find(|word| is_mixed_script(word))
        .map(str::to_owned)
}

fn trim_word(raw: &str) -> &str {
    raw.trim_matches(|ch: char| !ch.is_alphanumeric())
}

fn is_mixed_script(word: &str) -> bool {
    let latin = word.chars().any(|ch| ch.is_ascii_alphabetic());
    let confusable = word
        .chars()
        .any(|ch| matches!(ch, '\u{0370}'..='\u{03FF}' | '\u{0400}'..='\u{04FF}'));
    latin && confusable
}
