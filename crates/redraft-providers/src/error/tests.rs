//! Unit tests for provider error types.

use std::sync::Arc;

use rstest::rstest;

use super::*;

#[rstest]
#[case::timeout(
    ProviderError::Timeout {
        name: "slow".into(),
        timeout_ms: 1500,
    },
    "1500"
)]
#[case::non_zero_exit(
    ProviderError::NonZeroExit {
        name: "buggy".into(),
        status: 127,
    },
    "127"
)]
fn error_message_includes_numeric_field(#[case] error: ProviderError, #[case] expected: &str) {
    let message = error.to_string();
    assert!(message.contains(expected), "expected {expected} in: {message}");
}

#[test]
fn rejected_message_names_provider_and_reason() {
    let error = ProviderError::Rejected {
        name: "llm".into(),
        message: "content policy".into(),
    };
    let message = error.to_string();
    assert!(message.contains("llm"));
    assert!(message.contains("content policy"));
}

#[test]
fn io_error_exposes_source() {
    let error = ProviderError::Io {
        name: "llm".into(),
        source: Arc::new(std::io::Error::other("pipe closed")),
    };
    let source = std::error::Error::source(&error).expect("source should be present");
    assert!(source.to_string().contains("pipe closed"));
}

#[rstest]
#[case(ProviderError::Timeout { name: "p".into(), timeout_ms: 1 }, true)]
#[case(ProviderError::Unavailable { message: "down".into() }, false)]
fn timeout_is_distinguishable(#[case] error: ProviderError, #[case] expected: bool) {
    assert_eq!(error.is_timeout(), expected);
}
