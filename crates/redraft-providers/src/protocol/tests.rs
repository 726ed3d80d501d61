//! Unit tests for the provider protocol types.

use redraft_core::Controls;

use super::*;

#[test]
fn request_embeds_rendered_prompt() {
    let directive = RewriteDirective::new(&Controls::default(), vec!["[2]".into()]);
    let request = ProviderRequest::new("Text [2].", &directive);
    assert_eq!(request.prompt(), directive.prompt());
    let json = serde_json::to_value(&request).expect("serialise request");
    assert_eq!(json["operation"], "rewrite");
    assert_eq!(json["directive"]["protected"][0], "[2]");
}

#[test]
fn response_parses_minimal_success() {
    let response: ProviderResponse =
        serde_json::from_str(r#"{"success":true,"text":"Better text."}"#).expect("parse");
    assert_eq!(response.into_text("p").expect("text"), "Better text.");
}

#[test]
fn failure_response_becomes_rejection() {
    let error = ProviderResponse::failure("quota exhausted")
        .into_text("p")
        .expect_err("failure must not yield text");
    assert!(matches!(error, ProviderError::Rejected { ref message, .. } if message == "quota exhausted"));
}

#[test]
fn success_without_text_is_invalid() {
    let response: ProviderResponse = serde_json::from_str(r#"{"success":true}"#).expect("parse");
    assert!(matches!(
        response.into_text("p"),
        Err(ProviderError::InvalidOutput { .. })
    ));
}

#[test]
fn failure_serialises_without_text() {
    let json = serde_json::to_string(&ProviderResponse::failure("no")).expect("serialise");
    assert_eq!(json, r#"{"success":false,"message":"no"}"#);
}
