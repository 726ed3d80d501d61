//! Policy screening of revision requests.
//!
//! A request is refused when its instructions, or meta-text embedded in the
//! original text, ask for help evading AI-content detection, evading
//! plagiarism checks, or otherwise cheating. Document prose itself is never
//! screened, so an essay *about* detectors revises normally.
//!
//! Screening runs on normalised tokens (see [`normalise`]) and matches cue
//! phrases either outright or as a leading cue followed closely by a target.

mod cues;
mod inspect;
mod meta;
mod normalise;
mod verdict;

pub use self::inspect::{CandidateFlag, inspect_candidate};
pub use self::verdict::{GuardrailVerdict, REFUSAL_MESSAGE, ReasonCode};

use crate::request::RevisionRequest;

/// Classifies the original text and an optional instruction hint.
///
/// # Example
///
/// ```
/// use redraft_core::{ReasonCode, classify};
///
/// let denied = classify("Plain essay text.", Some("bypass AI detection"));
/// assert_eq!(denied.reason_code(), ReasonCode::EvadeDetection);
///
/// let allowed = classify("Plain essay text.", Some("make it more formal"));
/// assert!(allowed.allowed());
/// ```
#[must_use]
pub fn classify(original_text: &str, instructions: Option<&str>) -> GuardrailVerdict {
    let from_instructions = instructions.and_then(|hint| cues::detect(&normalise::normalise(hint)));
    let from_meta = meta::segments(original_text)
        .iter()
        .filter_map(|segment| cues::detect(&normalise::normalise(segment)))
        .min();
    GuardrailVerdict::from_reason(from_instructions.into_iter().chain(from_meta).min())
}

/// Classifies a whole request.
#[must_use]
pub fn classify_request(request: &RevisionRequest) -> GuardrailVerdict {
    classify(request.original_text(), request.instructions())
}
