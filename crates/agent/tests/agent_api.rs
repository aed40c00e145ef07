//! Integration tests for the orchestrator endpoints, driven with scripted
//! model backends so every reply shape the contract cares about is covered.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crewdesk_agent::config::AgentConfig;
use crewdesk_agent::model::{ModelBackend, ModelError};
use crewdesk_agent::routes;
use crewdesk_agent::state::AgentState;

/// Backend that always answers with a fixed string.
struct ScriptedBackend {
    reply: String,
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.reply.clone())
    }
}

/// Backend that always fails as unreachable.
struct DeadBackend;

#[async_trait]
impl ModelBackend for DeadBackend {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Unreachable("connection refused".into()))
    }
}

fn test_config() -> AgentConfig {
    AgentConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        model: "gemini-2.0-flash".to_string(),
        api_key: Some("test-key".to_string()),
        api_base_url: "http://127.0.0.1:9".to_string(),
        model_timeout_secs: 30,
    }
}

fn app_with_reply(reply: &str) -> Router {
    let backend: Arc<dyn ModelBackend> = Arc::new(ScriptedBackend {
        reply: reply.to_string(),
    });
    routes::router(AgentState::new(Some(backend), test_config()))
}

fn app_unconfigured() -> Router {
    let mut config = test_config();
    config.api_key = None;
    routes::router(AgentState::new(None, config))
}

async fn post(app: Router, path: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn five_member_team() -> Vec<Value> {
    (1..=5)
        .map(|i| {
            json!({
                "id": format!("u{i}"),
                "name": format!("Member {i}"),
                "skills": ["rust"],
                "capacity_hours": 40.0,
                "assigned_hours": (i as f64) * 5.0,
            })
        })
        .collect()
}

fn assignment_body() -> Value {
    json!({
        "task": {"title": "Build exporter", "complexity": "medium"},
        "team": five_member_team(),
        "instructions": "Return JSON.",
    })
}

const ASSIGNMENT_FIELDS: &[&str] = &[
    "predicted_hours",
    "best_member_id",
    "priority",
    "deadline",
    "flowchart_next_step",
    "required_meeting",
    "meeting_suggestion",
    "reason",
];

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_backend_and_model() {
    let app = app_with_reply("{}");
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend_configured"], true);
    assert_eq!(body["auth_method"], "api_key");
    assert_eq!(body["model"], "gemini-2.0-flash");
}

#[tokio::test]
async fn health_reports_unconfigured_backend() {
    let app = app_unconfigured();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["backend_configured"], false);
    assert_eq!(body["auth_method"], "none");
}

// ---------------------------------------------------------------------------
// Assignment output contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assignment_with_well_formed_reply_keeps_model_values() {
    let reply = r#"Here you go:
{"predicted_hours": 12.0, "best_member_id": "u3", "priority": 2,
 "deadline": "2026-09-01", "flowchart_next_step": "Testing",
 "required_meeting": true,
 "meeting_suggestion": {"attendees": ["u3"], "duration": 45, "day": "2026-08-10"},
 "reason": "u3 has capacity"}"#;
    let response = post(app_with_reply(reply), "/assignment", assignment_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["predicted_hours"], 12.0);
    assert_eq!(body["best_member_id"], "u3");
    assert_eq!(body["priority"], 2);
    assert_eq!(body["required_meeting"], true);
    assert_eq!(body["meeting_suggestion"]["duration"], 45);
}

#[tokio::test]
async fn assignment_with_empty_reply_returns_full_default_shape() {
    let response = post(app_with_reply(""), "/assignment", assignment_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    for field in ASSIGNMENT_FIELDS {
        assert!(body.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(body["predicted_hours"], 8.0);
    assert_eq!(body["best_member_id"], "u1");
    assert_eq!(body["priority"], 3);
    assert_eq!(body["flowchart_next_step"], "Development");
    assert_eq!(body["required_meeting"], false);
    assert_eq!(body["meeting_suggestion"], Value::Null);
}

#[tokio::test]
async fn assignment_with_malformed_json_defaults_and_keeps_raw_response() {
    let response = post(
        app_with_reply("{definitely not json"),
        "/assignment",
        assignment_body(),
    )
    .await;
    let body = body_json(response).await;

    for field in ASSIGNMENT_FIELDS {
        assert!(body.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(body["raw_response"], "{definitely not json");
}

#[tokio::test]
async fn assignment_with_partial_reply_fills_the_gaps() {
    let response = post(
        app_with_reply(r#"{"predicted_hours": 3.5, "surprise": "kept"}"#),
        "/assignment",
        assignment_body(),
    )
    .await;
    let body = body_json(response).await;

    assert_eq!(body["predicted_hours"], 3.5);
    // Extra fields from the model survive defaulting.
    assert_eq!(body["surprise"], "kept");
    // Missing fields are defaulted.
    assert_eq!(body["priority"], 3);
    assert_eq!(body["best_member_id"], "u1");
}

#[tokio::test]
async fn assignment_with_empty_team_defaults_member_to_null() {
    let body = json!({
        "task": {"title": "Orphan task"},
        "team": [],
        "instructions": "",
    });
    let response = post(app_with_reply(""), "/assignment", body).await;
    let body = body_json(response).await;
    assert_eq!(body["best_member_id"], Value::Null);
}

// ---------------------------------------------------------------------------
// Other operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summarize_defaults_when_reply_has_no_json() {
    let response = post(
        app_with_reply("Sorry, I can only answer in prose."),
        "/summarize",
        json!({"messages": [{"sender_id": "u1", "text": "hi"}], "instructions": ""}),
    )
    .await;
    let body = body_json(response).await;

    assert_eq!(body["bullets"], json!(["Summary not available"]));
    assert_eq!(body["status"], "In progress");
    assert_eq!(body["next_step"], "Continue execution");
    assert!(body["raw_response"].is_string());
}

#[tokio::test]
async fn overload_defaults_rank_request_workloads() {
    let workloads = json!([
        {"id": "a", "name": "A", "utilization": 0.5},
        {"id": "b", "name": "B", "utilization": 1.5},
        {"id": "c", "name": "C", "utilization": 1.0},
        {"id": "d", "name": "D", "utilization": 0.25},
    ]);
    let response = post(
        app_with_reply(""),
        "/overload",
        json!({"workloads": workloads, "instructions": ""}),
    )
    .await;
    let body = body_json(response).await;

    let ids: Vec<&str> = body["overloaded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn meeting_reply_always_has_full_shape() {
    let response = post(
        app_with_reply(r#"{"duration": 60}"#),
        "/meeting",
        json!({"context": {"topic": "kickoff"}, "instructions": ""}),
    )
    .await;
    let body = body_json(response).await;

    assert_eq!(body["duration"], 60);
    assert_eq!(body["attendees"], json!([]));
    assert_eq!(body["reason"], "Team sync recommended");
    assert!(body["day"].is_string());
}

#[tokio::test]
async fn flowchart_defaults_on_empty_reply() {
    let response = post(
        app_with_reply(""),
        "/flowchart",
        json!({"task": {"title": "x"}, "instructions": ""}),
    )
    .await;
    let body = body_json(response).await;

    assert_eq!(body["flowchart_next_step"], "Development");
    assert_eq!(body["blockers"], json!([]));
    assert_eq!(body["recommended_action"], "Continue with current step");
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unconfigured_backend_answers_503() {
    let response = post(app_unconfigured(), "/assignment", assignment_body()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn unreachable_model_answers_502() {
    let backend: Arc<dyn ModelBackend> = Arc::new(DeadBackend);
    let app = routes::router(AgentState::new(Some(backend), test_config()));

    let response = post(app, "/assignment", assignment_body()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("unreachable"));
}

#[tokio::test]
async fn malformed_request_body_answers_400() {
    let app = app_with_reply("{}");
    let request = Request::builder()
        .method("POST")
        .uri("/assignment")
        .header("content-type", "application/json")
        .body(Body::from("{broken"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].is_string());
}
