//! Integration tests for status-update broadcasts.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app_without_agent, get, post, token_for};
use crewdesk_store::DocumentStore;
use serde_json::json;

#[tokio::test]
async fn create_update_stamps_author_from_token() {
    let app = build_test_app_without_agent();
    let token = token_for("author-1", Some("Avery"));

    let response = post(
        &app.router,
        "/updates",
        &token,
        json!({"priority": "high", "message": "Deploy went out", "task_id": "t1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let update = body_json(response).await;
    assert_eq!(update["user_id"], "author-1");
    assert_eq!(update["user_name"], "Avery");
    assert_eq!(update["priority"], "high");
    assert_eq!(update["task_id"], "t1");
    assert!(update["created_at"].is_string());
}

#[tokio::test]
async fn create_update_rejects_unknown_priority() {
    let app = build_test_app_without_agent();
    let token = token_for("author-1", None);

    let response = post(
        &app.router,
        "/updates",
        &token,
        json!({"priority": "urgent", "message": "nope"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updates_list_newest_first_with_limit() {
    let app = build_test_app_without_agent();
    let token = token_for("reader-1", None);

    for (message, created_at) in [
        ("oldest", "2026-01-01T00:00:00Z"),
        ("middle", "2026-01-02T00:00:00Z"),
        ("newest", "2026-01-03T00:00:00Z"),
    ] {
        app.store
            .create(
                "updates",
                json!({"message": message, "priority": "low", "created_at": created_at}),
            )
            .await
            .unwrap();
    }

    let response = get(&app.router, "/updates?limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updates = body_json(response).await;
    let messages: Vec<&str> = updates
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["newest", "middle"]);
}
