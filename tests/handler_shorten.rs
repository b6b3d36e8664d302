mod common;

use axum::http::StatusCode;
use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use url_registry::api::handlers::shorten_handler;
use url_registry::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_url_success() {
    let (state, repository) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["code"].as_str().unwrap();

    assert_eq!(json["long_url"], "https://example.com/some/page");
    assert_eq!(code.len(), 9);
    assert!(
        code.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, repository) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_shorten_url_with_newline() {
    let (state, repository) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a\nb" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(
        json["error"]["details"]["reason"],
        "URL must not contain control characters"
    );
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (state, _repository) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_same_url_twice() {
    let (state, repository) = common::create_test_state();
    let server = server(state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "duplicate");
    assert_eq!(
        json["error"]["message"],
        "https://example.com has already been shortened."
    );
    assert_eq!(json["error"]["details"]["constraint"], "url_mappings_long_url_key");
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_shorten_code_collision() {
    let (state, repository) = common::create_fixed_code_state("collision");
    let server = server(state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/first" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/second" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["error"]["details"]["constraint"],
        "url_mappings_short_code_key"
    );
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_shorten_storage_unavailable() {
    let server = server(common::create_unavailable_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "persistence_error");
    assert_eq!(
        json["error"]["message"],
        "There was an issue shortening 'https://example.com'."
    );
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let (state, _repository) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "link": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
