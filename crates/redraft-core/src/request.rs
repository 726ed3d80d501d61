//! Revision request model: the text to revise and the controls applied to it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-step intensity used by the formality, concision, and variation
/// controls.
///
/// Serialised as the integers `0`, `1`, and `2`.
///
/// # Example
///
/// ```
/// use redraft_core::Level;
///
/// assert_eq!(Level::try_from(2), Ok(Level::High));
/// assert!(Level::try_from(3).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    /// Leave this aspect of the prose largely alone.
    Low,
    /// Moderate adjustment.
    #[default]
    Medium,
    /// Strong adjustment.
    High,
}

impl Level {
    /// Returns the numeric value of the level.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Returns a lower-case label suitable for prompts and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(RequestError::LevelOutOfRange { value: other }),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// User-designated terms that must survive revision verbatim.
///
/// Terms are compared case-insensitively: the first spelling of a term wins
/// and later duplicates are discarded. Blank terms are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeepTerms {
    terms: Vec<String>,
}

impl KeepTerms {
    /// Builds a deduplicated term set.
    #[must_use]
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        let mut folded: Vec<String> = Vec::new();
        for term in terms {
            let candidate: String = term.into();
            if candidate.trim().is_empty() {
                continue;
            }
            let key = candidate.to_lowercase();
            if folded.contains(&key) {
                continue;
            }
            folded.push(key);
            kept.push(candidate);
        }
        Self { terms: kept }
    }

    /// Returns the terms in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Returns true when no terms were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl From<Vec<String>> for KeepTerms {
    fn from(terms: Vec<String>) -> Self {
        Self::new(terms)
    }
}

impl From<KeepTerms> for Vec<String> {
    fn from(terms: KeepTerms) -> Self {
        terms.terms
    }
}

/// Stylistic controls attached to a revision request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// How far to shift the register towards formal prose.
    #[serde(default)]
    pub formality: Level,
    /// How aggressively to tighten wording.
    #[serde(default)]
    pub concision: Level,
    /// How much to vary sentence structure and length.
    #[serde(default)]
    pub variation: Level,
    /// Whether citations are protected from rewriting.
    #[serde(default = "default_lock_citations")]
    pub lock_citations: bool,
    /// Terms that must be reproduced exactly.
    #[serde(default)]
    pub keep_terms: KeepTerms,
}

const fn default_lock_citations() -> bool {
    true
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            formality: Level::default(),
            concision: Level::default(),
            variation: Level::default(),
            lock_citations: default_lock_citations(),
            keep_terms: KeepTerms::default(),
        }
    }
}

/// A request to revise a piece of prose.
///
/// # Example
///
/// ```
/// use redraft_core::{Controls, RevisionRequest};
///
/// let request = RevisionRequest::new("Some text.", Controls::default());
/// assert!(request.validate().is_ok());
/// assert!(request.instructions().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRequest {
    original_text: String,
    #[serde(default)]
    controls: Controls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

impl RevisionRequest {
    /// Creates a request without free-text instructions.
    #[must_use]
    pub fn new(original_text: impl Into<String>, controls: Controls) -> Self {
        Self {
            original_text: original_text.into(),
            controls,
            instructions: None,
        }
    }

    /// Attaches free-text instructions from the user.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Returns the text to revise.
    #[must_use]
    pub const fn original_text(&self) -> &str {
        self.original_text.as_str()
    }

    /// Returns the stylistic controls.
    #[must_use]
    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Returns the user's instructions, ignoring blank values.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyText`] when the original text is empty or
    /// contains only whitespace.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.original_text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        Ok(())
    }
}

/// Errors raised while validating a [`RevisionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The original text was empty.
    #[error("originalText must not be empty")]
    EmptyText,
    /// A control level fell outside `0..=2`.
    #[error("control level {value} is out of range (expected 0, 1, or 2)")]
    LevelOutOfRange {
        /// The rejected value.
        value: u8,
    },
}
