//! Integration tests for the gateway's AI query endpoints: pass-through when
//! the orchestrator answers, labelled local fallbacks when it does not.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_without_agent, get, post, spawn_agent_stub, token_for};
use crewdesk_store::DocumentStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// GET /agent/who-is-overloaded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn who_is_overloaded_fallback_ranks_top_three_by_utilization() {
    let app = build_test_app_without_agent();
    let token = token_for("reader-1", None);

    // Utilizations: a=0.25, b=1.5, c=0.75, d=0.75, e=0.1 — c before d on the
    // tie because roster order is preserved.
    for (id, assigned, capacity) in [
        ("a", 10.0, 40.0),
        ("b", 60.0, 40.0),
        ("c", 30.0, 40.0),
        ("d", 30.0, 40.0),
        ("e", 4.0, 40.0),
    ] {
        app.store
            .merge_write(
                "users",
                id,
                json!({
                    "name": id.to_uppercase(),
                    "assigned_hours": assigned,
                    "capacity_hours": capacity,
                }),
            )
            .await
            .unwrap();
    }

    let response = get(&app.router, "/agent/who-is-overloaded", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    let ids: Vec<&str> = report["overloaded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b", "c", "d"]);
    assert_eq!(report["suggestions"].as_array().unwrap().len(), 2);
    assert!(report["note"]
        .as_str()
        .unwrap()
        .starts_with("AI unavailable"));
}

#[tokio::test]
async fn who_is_overloaded_relays_agent_reply() {
    let agent_url = spawn_agent_stub(json!({
        "overloaded": [{"name": "B", "utilization": 1.5}],
        "suggestions": ["Move two tasks off B"],
    }))
    .await;
    let app = build_test_app(&agent_url);
    let token = token_for("reader-1", None);

    app.store
        .merge_write(
            "users",
            "b",
            json!({"name": "B", "assigned_hours": 60.0, "capacity_hours": 40.0}),
        )
        .await
        .unwrap();

    let response = get(&app.router, "/agent/who-is-overloaded", &token).await;
    let report = body_json(response).await;
    assert_eq!(report["overloaded"][0]["name"], "B");
    assert_eq!(report["suggestions"], json!(["Move two tasks off B"]));
}

// ---------------------------------------------------------------------------
// POST /agent/workload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn workload_report_fallback_uses_supplied_workloads() {
    let app = build_test_app_without_agent();
    let token = token_for("reader-1", None);

    let response = post(
        &app.router,
        "/agent/workload",
        &token,
        json!({"workloads": [
            {"id": "x", "utilization": 0.2},
            {"id": "y", "utilization": 0.9},
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    let ids: Vec<&str> = report["overloaded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["y", "x"]);
}

// ---------------------------------------------------------------------------
// POST /agent/meeting-suggestion and /agent/flowchart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn meeting_suggestion_fallback_has_full_shape() {
    let app = build_test_app_without_agent();
    let token = token_for("reader-1", None);

    let response = post(
        &app.router,
        "/agent/meeting-suggestion",
        &token,
        json!({"context": {"topic": "kickoff"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let suggestion = body_json(response).await;
    assert_eq!(suggestion["duration"], 30);
    assert_eq!(suggestion["attendees"], json!([]));
    assert_eq!(suggestion["reason"], "Team sync recommended");
    assert!(suggestion["day"].is_string());
}

#[tokio::test]
async fn flowchart_fallback_has_full_shape() {
    let app = build_test_app_without_agent();
    let token = token_for("reader-1", None);

    let response = post(
        &app.router,
        "/agent/flowchart",
        &token,
        json!({"task": {"title": "x", "status": "open"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let prediction = body_json(response).await;
    assert_eq!(prediction["flowchart_next_step"], "Development");
    assert_eq!(prediction["blockers"], json!([]));
    assert_eq!(prediction["recommended_action"], "Continue with current step");
}

#[tokio::test]
async fn flowchart_relays_agent_reply() {
    let agent_url = spawn_agent_stub(json!({
        "flowchart_next_step": "Review",
        "blockers": ["awaiting QA"],
        "recommended_action": "Request review",
    }))
    .await;
    let app = build_test_app(&agent_url);
    let token = token_for("reader-1", None);

    let response = post(
        &app.router,
        "/agent/flowchart",
        &token,
        json!({"task": {"title": "x"}}),
    )
    .await;
    let prediction = body_json(response).await;
    assert_eq!(prediction["flowchart_next_step"], "Review");
    assert_eq!(prediction["blockers"], json!(["awaiting QA"]));
}
