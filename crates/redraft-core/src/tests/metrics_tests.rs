//! Golden and property tests for the metrics engine.
#![expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point metrics within a tolerance"
)]

use rstest::rstest;

use crate::{MetricsConfig, MetricsEngine, READABILITY_BASELINE, analyze};

#[test]
fn two_equal_sentences() {
    let metrics = analyze("The cat sat. The dog ran.");
    assert_eq!(metrics.sentence_lengths, vec![3, 3]);
    assert!(metrics.length_variance.abs() < f64::EPSILON);
    assert!((metrics.lexical_diversity - 5.0 / 6.0).abs() < 1e-9);
    assert!((metrics.repetition_ratio - 1.0).abs() < f64::EPSILON);
    assert!(metrics.passive_pct.abs() < f64::EPSILON);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("... !!!")]
fn text_without_sentences_yields_sentinels(#[case] text: &str) {
    let metrics = analyze(text);
    assert!((metrics.readability - READABILITY_BASELINE).abs() < f64::EPSILON);
    assert!(metrics.length_variance.abs() < f64::EPSILON);
    assert!(metrics.sentence_lengths.is_empty());
    assert!(metrics.passive_pct.abs() < f64::EPSILON);
    assert!(metrics.lexical_diversity.abs() < f64::EPSILON);
    assert!((metrics.repetition_ratio - 1.0).abs() < f64::EPSILON);
}

#[test]
fn readability_follows_reading_ease_formula() {
    // 4 words, 1 sentence, 4 syllables.
    let metrics = analyze("The cat sat down.");
    let expected = 206.835 - 1.015 * 4.0 - 84.6 * 1.0;
    assert!((metrics.readability - expected).abs() < 1e-9);
}

#[test]
fn repeated_pairs_lower_the_ratio() {
    let metrics = analyze("go on go on go on");
    // pairs: go-on, on-go, go-on, on-go, go-on -> 2 distinct of 5
    assert!((metrics.repetition_ratio - 0.4).abs() < 1e-9);
}

#[test]
fn passive_sentences_are_counted() {
    let metrics = analyze("The report was written by Ana. She likes tea.");
    assert!((metrics.passive_pct - 50.0).abs() < 1e-9);
}

#[test]
fn passive_window_is_configurable() {
    let text = "The ball was very quickly and loudly kicked.";
    assert!(analyze(text).passive_pct.abs() < f64::EPSILON);
    let wide = MetricsEngine::with_config(MetricsConfig::default().with_passive_window(5));
    assert!((wide.analyze(text).passive_pct - 100.0).abs() < 1e-9);
}

#[test]
fn variance_is_population_variance() {
    let metrics = analyze("One two. One two three four.");
    assert_eq!(metrics.sentence_lengths, vec![2, 4]);
    assert!((metrics.length_variance - 1.0).abs() < 1e-9);
}

#[rstest]
#[case("A a a a a a.")]
#[case("Words, words; more words! And yet more words?")]
#[case("Über naïve café résumé.")]
fn ratios_stay_in_bounds(#[case] text: &str) {
    let metrics = analyze(text);
    assert!((0.0..=1.0).contains(&metrics.lexical_diversity));
    assert!((0.0..=1.0).contains(&metrics.repetition_ratio));
    assert!((0.0..=100.0).contains(&metrics.passive_pct));
}
