//! Integration tests for the slash command webhook.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use results_bot::api::{create_router, AppState, RETRIEVING_RESULTS};
use results_bot::error::FRAMEWORK_ERROR;
use results_bot::worker::{work_queue, CommandRequest};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Create a test app. The registry points at a URL nothing listens on since
/// the webhook never fetches.
fn create_test_app(capacity: usize) -> (Router, mpsc::Receiver<CommandRequest>) {
    let (queue, receiver) = work_queue(capacity);
    let state = AppState::new(common::test_registry("http://localhost:9999"), queue);
    (create_router(state), receiver)
}

fn slash_command(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/slack/commands")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _receiver) = create_test_app(4);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["commands"], 2);
}

#[tokio::test]
async fn test_known_command_is_queued() {
    let (app, mut receiver) = create_test_app(4);

    let response = app
        .oneshot(slash_command(
            "command=%2Fzwift&text=event+12345&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1%2F2%2Fabc&user_name=jane",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["response_type"], "ephemeral");
    assert_eq!(json["text"], RETRIEVING_RESULTS);

    let request = receiver.try_recv().unwrap();
    assert_eq!(request.text, "event 12345");
    assert_eq!(request.response_url, "https://hooks.slack.com/commands/T1/2/abc");
    assert_eq!(request.extra.get("user_name").map(String::as_str), Some("jane"));
    assert_eq!(request.extra.get("command").map(String::as_str), Some("/zwift"));
}

#[tokio::test]
async fn test_command_via_query_string_is_queued() {
    let (app, mut receiver) = create_test_app(4);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/slack/commands?text=team+3&response_url=https%3A%2F%2Fexample.com%2Fhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["text"], RETRIEVING_RESULTS);

    let request = receiver.try_recv().unwrap();
    assert_eq!(request.text, "team 3");
    assert_eq!(request.response_url, "https://example.com/hook");
}

#[tokio::test]
async fn test_invalid_event_id_is_still_queued() {
    // Argument validation belongs to the worker, which replies with the error
    let (app, mut receiver) = create_test_app(4);

    let response = app
        .oneshot(slash_command("text=event+abc&response_url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();

    assert_eq!(json_body(response).await["text"], RETRIEVING_RESULTS);
    assert_eq!(receiver.try_recv().unwrap().text, "event abc");
}

#[tokio::test]
async fn test_unknown_command_is_not_queued() {
    let (app, mut receiver) = create_test_app(4);

    let response = app
        .oneshot(slash_command("text=foo&response_url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["response_type"], "ephemeral");
    assert!(json["text"].as_str().unwrap().contains("don't understand `foo`"));
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_empty_command_is_not_queued() {
    let (app, mut receiver) = create_test_app(4);

    let response = app
        .oneshot(slash_command("text=&response_url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert!(json["text"].as_str().unwrap().contains("don't understand"));
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_missing_response_url() {
    let (app, mut receiver) = create_test_app(4);

    let response = app.oneshot(slash_command("text=team")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["response_type"], "ephemeral");
    assert_eq!(json["text"], FRAMEWORK_ERROR);
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_wrong_content_type() {
    let (app, _receiver) = create_test_app(4);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/slack/commands")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "team"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(json_body(response).await["text"], FRAMEWORK_ERROR);
}

#[tokio::test]
async fn test_full_queue_is_reported() {
    let (app, mut receiver) = create_test_app(1);

    let first = app
        .clone()
        .oneshot(slash_command("text=team&response_url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();
    assert_eq!(json_body(first).await["text"], RETRIEVING_RESULTS);

    let second = app
        .oneshot(slash_command("text=team+2&response_url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();
    assert_eq!(json_body(second).await["text"], FRAMEWORK_ERROR);

    assert_eq!(receiver.try_recv().unwrap().text, "team");
    assert!(receiver.try_recv().is_err());
}
