//! Behavioural tests for request dispatch through a bootstrapped daemon.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

use redraft_core::REFUSAL_MESSAGE;
use redraft_providers::ScriptedReply;

use super::support::{self, QuotedString, TestWorld};

const CITED: &str = "Attention works well (Vaswani et al., 2017).";

#[fixture]
fn world() -> RefCell<TestWorld> {
    support::world()
}

fn repeat(reply: &ScriptedReply) -> Vec<ScriptedReply> {
    vec![reply.clone(); 3]
}

#[given("the provider replies {reply}")]
fn given_reply(world: &RefCell<TestWorld>, reply: QuotedString) {
    world.borrow_mut().script([ScriptedReply::Text(reply.0)]);
}

#[given("the provider drops every citation")]
fn given_dropping_provider(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .script(repeat(&ScriptedReply::text("Attention works well.")));
}

#[given("the provider rejects every request")]
fn given_rejecting_provider(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .script(repeat(&ScriptedReply::Reject(String::from("quota exceeded"))));
}

#[given("the provider times out on every request")]
fn given_timing_out_provider(world: &RefCell<TestWorld>) {
    world.borrow_mut().script(repeat(&ScriptedReply::Timeout));
}

#[given("the daemon allows {attempts} attempts")]
fn given_attempt_limit(world: &RefCell<TestWorld>, attempts: u32) {
    world.borrow_mut().limit_attempts(attempts);
}

#[when("the client revises {text}")]
fn when_revise(world: &RefCell<TestWorld>, text: QuotedString) {
    let body = json!({ "originalText": text.0 });
    send(world, "POST", "/revise", &body);
}

#[when("the cited sentence is submitted for revision")]
fn when_revise_cited(world: &RefCell<TestWorld>) {
    send(world, "POST", "/revise", &json!({ "originalText": CITED }));
}

#[when("the client submits {text} with instructions {instructions}")]
fn when_revise_with_instructions(
    world: &RefCell<TestWorld>,
    text: QuotedString,
    instructions: QuotedString,
) {
    let body = json!({ "originalText": text.0, "instructions": instructions.0 });
    send(world, "POST", "/revise", &body);
}

#[when("the client requests metrics for {text}")]
fn when_metrics(world: &RefCell<TestWorld>, text: QuotedString) {
    send(world, "POST", "/metrics", &json!({ "text": text.0 }));
}

#[when("the client sends a {method} request to {path}")]
fn when_raw_request(world: &RefCell<TestWorld>, method: String, path: String) {
    send(world, &method, &path, &json!({ "text": "Some text." }));
}

#[when("the client sends malformed JSON")]
fn when_malformed(world: &RefCell<TestWorld>) {
    world.borrow_mut().send("{\"method\": \"POST\", \"path\"");
}

fn send(world: &RefCell<TestWorld>, method: &str, path: &str, body: &serde_json::Value) {
    let line = json!({ "method": method, "path": path, "body": body }).to_string();
    world.borrow_mut().send(&line);
}

#[then("the response status is {status}")]
fn then_status(world: &RefCell<TestWorld>, status: u16) {
    let world = world.borrow();
    assert_eq!(
        world.response().status(),
        status,
        "body: {}",
        world.body()
    );
}

#[then("the response carries the refusal message")]
fn then_refusal(world: &RefCell<TestWorld>) {
    assert_eq!(world.borrow().body(), &json!({ "error": REFUSAL_MESSAGE }));
}

#[then("the revised text keeps the citation")]
fn then_citation_kept(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    let revised = world.body()["revisedText"].as_str().expect("revisedText");
    assert!(revised.contains("(Vaswani et al., 2017)"), "got: {revised}");
}

#[then("the response reports {attempts} attempts")]
fn then_attempts(world: &RefCell<TestWorld>, attempts: u64) {
    assert_eq!(world.borrow().body()["attempts"], attempts);
}

#[then("the last violations list the citation")]
fn then_last_violations(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    let violations = world.body()["lastViolations"]
        .as_array()
        .expect("lastViolations");
    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0]["text"], "(Vaswani et al., 2017)");
    assert_eq!(violations[0]["kind"], "Citation");
}

#[then("the response lists {count} sentences")]
fn then_sentences(world: &RefCell<TestWorld>, count: usize) {
    let world = world.borrow();
    let lengths = world.body()["sentenceLengths"]
        .as_array()
        .expect("sentenceLengths");
    assert_eq!(lengths.len(), count);
}

#[then("the error mentions {fragment}")]
fn then_error_mentions(world: &RefCell<TestWorld>, fragment: QuotedString) {
    let world = world.borrow();
    let message = world.body()["error"].as_str().expect("error message");
    assert!(message.contains(&fragment.0), "got: {message}");
}

#[then("the provider received {count} calls")]
fn then_calls(world: &RefCell<TestWorld>, count: usize) {
    assert_eq!(world.borrow().providers.provider().call_count(), count);
}

#[scenario(path = "tests/features/request_dispatch.feature")]
fn request_dispatch(world: RefCell<TestWorld>) {
    let _ = world;
}
