//! Readability and style metrics for a single text.
//!
//! [`analyze`] is a pure function: the same text always yields the same
//! [`MetricsResult`]. Degenerate inputs produce fixed sentinels instead of
//! NaN or infinities:
//!
//! - no sentences or no words: `readability` is [`READABILITY_BASELINE`]
//! - zero or one sentence: `length_variance` is `0`
//! - fewer than two words: `repetition_ratio` is `1`
//! - no sentences: `passive_pct` is `0`
//! - no words: `lexical_diversity` is `0`

mod heuristics;
mod sentences;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tokenize;

/// Readability score reported for text without sentences or words.
pub const READABILITY_BASELINE: f64 = 206.835;

const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
const SYLLABLE_WEIGHT: f64 = 84.6;

/// Default number of words after a *be* verb searched for a participle.
pub const DEFAULT_PASSIVE_WINDOW: usize = 3;

/// Measurements derived from one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    /// Flesch reading-ease score.
    pub readability: f64,
    /// Word count of each sentence, in order.
    pub sentence_lengths: Vec<usize>,
    /// Population variance of the sentence lengths.
    pub length_variance: f64,
    /// Distinct adjacent word pairs over all adjacent pairs, in `[0, 1]`.
    pub repetition_ratio: f64,
    /// Share of passive sentences as a percentage, in `[0, 100]`.
    pub passive_pct: f64,
    /// Distinct case-folded words over all words, in `[0, 1]`.
    pub lexical_diversity: f64,
}

impl MetricsResult {
    /// Mean words per sentence, or zero for text without sentences.
    #[must_use]
    pub fn mean_sentence_length(&self) -> f64 {
        mean(&self.sentence_lengths)
    }

    /// Total words across all sentences.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.sentence_lengths.iter().sum()
    }
}

/// Tunable heuristics used by the metrics engine.
///
/// # Example
///
/// ```
/// use redraft_core::MetricsConfig;
///
/// let config = MetricsConfig::default().with_passive_window(5);
/// assert_eq!(config.passive_window(), 5);
/// assert!(config.silent_e());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    passive_window: usize,
    silent_e: bool,
}

impl MetricsConfig {
    /// Sets how many words after a *be* verb are searched for a participle.
    #[must_use]
    pub const fn with_passive_window(mut self, window: usize) -> Self {
        self.passive_window = window;
        self
    }

    /// Enables or disables the trailing silent-e syllable rule.
    #[must_use]
    pub const fn with_silent_e(mut self, enabled: bool) -> Self {
        self.silent_e = enabled;
        self
    }

    /// Returns the passive-voice search window.
    #[must_use]
    pub const fn passive_window(&self) -> usize {
        self.passive_window
    }

    /// Returns whether the silent-e rule applies.
    #[must_use]
    pub const fn silent_e(&self) -> bool {
        self.silent_e
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            passive_window: DEFAULT_PASSIVE_WINDOW,
            silent_e: true,
        }
    }
}

/// Metrics engine bound to a heuristic configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsEngine {
    config: MetricsConfig,
}

impl MetricsEngine {
    /// Creates an engine with custom heuristics.
    #[must_use]
    pub const fn with_config(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Computes all metrics for `text`.
    #[must_use]
    pub fn analyze(&self, text: &str) -> MetricsResult {
        let sentences = sentences::sentences(text);
        let words = tokenize::words(text);
        let folded: Vec<String> = words.iter().map(|word| word.to_lowercase()).collect();
        let syllable_total: usize = words
            .iter()
            .map(|word| heuristics::syllables(word, &self.config))
            .sum();
        let sentence_lengths: Vec<usize> = sentences.iter().map(Vec::len).collect();
        let passive = sentences
            .iter()
            .filter(|sentence| heuristics::is_passive(sentence, &self.config))
            .count();

        MetricsResult {
            readability: readability(words.len(), sentences.len(), syllable_total),
            length_variance: variance(&sentence_lengths),
            sentence_lengths,
            repetition_ratio: repetition_ratio(&folded),
            passive_pct: percentage(passive, sentences.len()),
            lexical_diversity: lexical_diversity(&folded),
        }
    }
}

/// Computes metrics with the default heuristics.
///
/// # Example
///
/// ```
/// use redraft_core::analyze;
///
/// let metrics = analyze("The cat sat. The dog ran.");
/// assert_eq!(metrics.sentence_lengths, vec![3, 3]);
/// assert_eq!(metrics.length_variance, 0.0);
/// ```
#[must_use]
pub fn analyze(text: &str) -> MetricsResult {
    MetricsEngine::default().analyze(text)
}

#[expect(
    clippy::float_arithmetic,
    reason = "reading-ease is defined over floating-point ratios"
)]
fn readability(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 || sentences == 0 {
        return READABILITY_BASELINE;
    }
    let words_per_sentence = as_f64(words) / as_f64(sentences);
    let syllables_per_word = as_f64(syllables) / as_f64(words);
    READABILITY_BASELINE
        - SENTENCE_LENGTH_WEIGHT * words_per_sentence
        - SYLLABLE_WEIGHT * syllables_per_word
}

#[expect(clippy::float_arithmetic, reason = "mean of word counts")]
fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    as_f64(values.iter().sum()) / as_f64(values.len())
}

#[expect(clippy::float_arithmetic, reason = "population variance of word counts")]
fn variance(values: &[usize]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let centre = mean(values);
    let squared: f64 = values
        .iter()
        .map(|value| {
            let delta = as_f64(*value) - centre;
            delta * delta
        })
        .sum();
    squared / as_f64(values.len())
}

fn repetition_ratio(folded: &[String]) -> f64 {
    if folded.len() < 2 {
        return 1.0;
    }
    let pairs: Vec<(&str, &str)> = folded
        .windows(2)
        .filter_map(|pair| match pair {
            [first, second] => Some((first.as_str(), second.as_str())),
            _ => None,
        })
        .collect();
    let distinct: HashSet<&(&str, &str)> = pairs.iter().collect();
    ratio(distinct.len(), pairs.len())
}

fn lexical_diversity(folded: &[String]) -> f64 {
    if folded.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&String> = folded.iter().collect();
    ratio(distinct.len(), folded.len())
}

#[expect(clippy::float_arithmetic, reason = "share expressed as a percentage")]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    ratio(part, whole) * 100.0
}

#[expect(clippy::float_arithmetic, reason = "share of two counts")]
fn ratio(part: usize, whole: usize) -> f64 {
    as_f64(part) / as_f64(whole)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "word and sentence counts stay far below 2^52"
)]
const fn as_f64(count: usize) -> f64 {
    count as f64
}
