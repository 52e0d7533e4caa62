//! Typing test session API tests.

mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::fixtures;
use common::{start_sample_session, TestContext};

/// Test health endpoint.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test starting a session returns the first prompt.
#[tokio::test]
async fn test_start_session() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(fixtures::sample_cards(), None, None))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["state"], "in_progress");
    assert_eq!(body["card_index"], 0);
    assert_eq!(body["total_cards"], 3);
    assert_eq!(body["prompt"], "chat");
    assert_eq!(body["card_status"], "unanswered");
    assert_eq!(body["can_go_previous"], false);
    assert!(body["started_at"].is_string());
    assert!(body["finished_at"].is_null());
    assert_eq!(ctx.state.sessions.len().unwrap(), 1);
}

/// Test reversed sides show the back as the prompt.
#[tokio::test]
async fn test_start_session_reversed_sides() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(
            fixtures::sample_cards(),
            Some("back"),
            Some("front"),
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["prompt"], "cat");
}

/// Test starting with no cards is rejected.
#[tokio::test]
async fn test_start_session_without_cards() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(serde_json::json!([]), None, None))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "no_cards");
}

/// Test identical prompt and answer sides are rejected.
#[tokio::test]
async fn test_start_session_same_sides() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(
            fixtures::sample_cards(),
            Some("front"),
            Some("front"),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_settings");
}

/// Test session limit is enforced.
#[tokio::test]
async fn test_session_limit() {
    let ctx = TestContext::with_max_sessions(1);
    let server = ctx.server();

    start_sample_session(&server).await;
    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(fixtures::sample_cards(), None, None))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

/// Test unknown session returns 404.
#[tokio::test]
async fn test_unknown_session() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get(&fixtures::session_path("6f1c2a1e-7f4b-4b8e-9d0a-2f1d3c4b5a69", None))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

/// Test checking a correct answer.
#[tokio::test]
async fn test_check_correct() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    let response = server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("cat"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["headline"], "Correct!");
    assert!(body.get("diff").is_none());
}

/// Test checking an incorrect answer returns a word diff.
#[tokio::test]
async fn test_check_incorrect_returns_diff() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await
        .assert_status_ok();

    let response = server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("the dog"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_correct"], false);
    assert_eq!(body["correct_answer"], "the big dog");

    let user_tokens = body["diff"]["user_tokens"].as_array().unwrap();
    assert_eq!(user_tokens.len(), 3);
    assert_eq!(user_tokens[1]["text"], "___");
    assert_eq!(user_tokens[1]["kind"], "missing_placeholder");

    let correct_tokens = body["diff"]["correct_tokens"].as_array().unwrap();
    assert_eq!(correct_tokens[1]["text"], "big");
    assert_eq!(correct_tokens[1]["kind"], "expected");
}

/// Test checking an empty answer is rejected without recording anything.
#[tokio::test]
async fn test_check_empty_answer() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    let response = server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("   "))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "empty_answer");

    let view: Value = server.get(&fixtures::session_path(&id, None)).await.json();
    assert_eq!(view["card_status"], "unanswered");
}

/// Test advancing with pending input checks it first.
#[tokio::test]
async fn test_advance_auto_checks_pending_input() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    server
        .put(&fixtures::session_path(&id, Some("input")))
        .json(&fixtures::input_request("cat"))
        .await
        .assert_status_ok();

    let response = server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["auto_checked"], true);
    assert_eq!(body["auto_check"]["is_correct"], true);
    assert_eq!(body["card_index"], 1);
    assert_eq!(body["finished"], false);
    assert_eq!(body["session"]["prompt"], "chien");
    assert_eq!(body["session"]["input"], "");
}

/// Test going back with pending input checks it before moving.
#[tokio::test]
async fn test_previous_auto_checks_pending_input() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await
        .assert_status_ok();
    server
        .put(&fixtures::session_path(&id, Some("input")))
        .json(&fixtures::input_request("the big dog"))
        .await
        .assert_status_ok();

    let response = server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("previous"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["auto_checked"], true);
    assert_eq!(body["auto_check"]["card_id"], 2);
    assert_eq!(body["auto_check"]["is_correct"], true);
    assert_eq!(body["card_index"], 0);
    assert_eq!(body["session"]["prompt"], "chat");
    assert_eq!(body["session"]["can_go_previous"], false);
}

/// Test advancing past the last card finishes the session.
#[tokio::test]
async fn test_advance_past_last_card_finishes() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    for _ in 0..2 {
        server
            .post(&fixtures::session_path(&id, Some("advance")))
            .json(&fixtures::advance_request("next"))
            .await
            .assert_status_ok();
    }

    let response = server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["finished"], true);
    assert_eq!(body["session"]["state"], "finished");
    assert!(body["session"]["finished_at"].is_string());

    let score: Value = server.get(&fixtures::session_path(&id, Some("score"))).await.json();
    assert_eq!(score["total_cards"], 3);
    assert_eq!(score["unanswered_count"], 3);
    assert_eq!(score["percentage"], 0);
}

/// Test a full run through: check, navigate, finish, score.
#[tokio::test]
async fn test_full_session_flow() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("cat"))
        .await
        .assert_status_ok();
    server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await
        .assert_status_ok();
    server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("a big dog"))
        .await
        .assert_status_ok();
    server
        .post(&fixtures::session_path(&id, Some("advance")))
        .json(&fixtures::advance_request("next"))
        .await
        .assert_status_ok();
    server
        .put(&fixtures::session_path(&id, Some("input")))
        .json(&fixtures::input_request("bird"))
        .await
        .assert_status_ok();

    let response = server.post(&fixtures::session_path(&id, Some("finish"))).await;
    response.assert_status_ok();
    let results: Value = response.json();
    assert_eq!(results["answers"].as_array().unwrap().len(), 3);
    assert_eq!(results["correct_count"], 2);
    assert_eq!(results["incorrect_count"], 1);

    let response = server.get(&fixtures::session_path(&id, Some("score"))).await;
    response.assert_status_ok();
    let score: Value = response.json();
    assert_eq!(score["percentage"], 67);
    assert_eq!(score["total_cards"], 3);
    assert_eq!(score["band"], "fair");
    assert_eq!(score["tier"], "medium");
    assert_eq!(score["message"], "Not bad! Review the material and try again.");
}

/// Test score before finishing is a state conflict.
#[tokio::test]
async fn test_score_before_finish() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    let response = server.get(&fixtures::session_path(&id, Some("score"))).await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_state");
}

/// Test retake clears answers and review keeps them.
#[tokio::test]
async fn test_retake_and_review() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    server
        .post(&fixtures::session_path(&id, Some("check")))
        .json(&fixtures::check_request("cat"))
        .await
        .assert_status_ok();
    server
        .post(&fixtures::session_path(&id, Some("finish")))
        .await
        .assert_status_ok();

    let response = server.post(&fixtures::session_path(&id, Some("review"))).await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["state"], "in_progress");
    assert_eq!(view["card_status"], "checked");
    assert_eq!(view["record"]["user_answer"], "cat");

    server
        .post(&fixtures::session_path(&id, Some("finish")))
        .await
        .assert_status_ok();

    let response = server.post(&fixtures::session_path(&id, Some("retake"))).await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["state"], "in_progress");
    assert_eq!(view["card_index"], 0);
    assert_eq!(view["card_status"], "unanswered");
}

/// Test retake before finishing is a state conflict.
#[tokio::test]
async fn test_retake_before_finish() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    let response = server.post(&fixtures::session_path(&id, Some("retake"))).await;
    response.assert_status(StatusCode::CONFLICT);
}

/// Test discarding a session.
#[tokio::test]
async fn test_discard_session() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = start_sample_session(&server).await;

    let response = server.delete(&fixtures::session_path(&id, None)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["deleted"], true);

    let response = server.get(&fixtures::session_path(&id, None)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(ctx.state.sessions.is_empty().unwrap());
}
