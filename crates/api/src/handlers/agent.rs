//! AI query handlers.
//!
//! These endpoints are pure enhancements: when the orchestrator cannot be
//! reached they answer with the labelled fallback shape from
//! [`crewdesk_assist::fallback`] rather than an error.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crewdesk_assist::fallback;
use crewdesk_core::domain::collections;
use crewdesk_core::workload::utilization;
use crewdesk_store::ListQuery;

use crate::error::{AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkloadRequest {
    #[serde(default)]
    pub workloads: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingSuggestionRequest {
    pub context: Value,
}

#[derive(Debug, Deserialize)]
pub struct FlowchartRequest {
    pub task: Value,
}

/// GET /agent/who-is-overloaded
///
/// Compute per-member utilization from the roster and ask the orchestrator
/// to rank the overload.
pub async fn who_is_overloaded(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = state
        .store
        .list(collections::USERS, &ListQuery::new())
        .await?;

    let workloads: Vec<Value> = users
        .iter()
        .map(|user| {
            let assigned = user
                .get("assigned_hours")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let capacity = user
                .get("capacity_hours")
                .and_then(Value::as_f64)
                .unwrap_or(40.0);
            json!({
                "id": user.get("id"),
                "name": user.get("name"),
                "utilization": utilization(assigned, capacity),
                "skills": user.get("skills"),
            })
        })
        .collect();

    Ok(Json(overload_or_fallback(&state, &workloads).await))
}

/// POST /agent/workload
///
/// Same ranking, but over caller-supplied workloads.
pub async fn workload_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<WorkloadRequest>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(overload_or_fallback(&state, &req.workloads).await))
}

/// POST /agent/meeting-suggestion
pub async fn meeting_suggestion(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<MeetingSuggestionRequest>,
) -> AppResult<impl IntoResponse> {
    let suggestion = match state.assist.suggest_meeting(&req.context).await {
        Ok(suggestion) => suggestion,
        Err(err) => {
            tracing::warn!(error = %err, "Suggesting meeting without AI");
            fallback::meeting(&err)
        }
    };
    Ok(Json(suggestion))
}

/// POST /agent/flowchart
pub async fn flowchart_prediction(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<FlowchartRequest>,
) -> AppResult<impl IntoResponse> {
    let prediction = match state.assist.flowchart_prediction(&req.task).await {
        Ok(prediction) => prediction,
        Err(err) => {
            tracing::warn!(error = %err, "Predicting workflow step without AI");
            fallback::flowchart(&err)
        }
    };
    Ok(Json(prediction))
}

async fn overload_or_fallback(state: &AppState, workloads: &[Value]) -> Value {
    match state.assist.overload_report(workloads).await {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(error = %err, "Ranking overload without AI");
            fallback::overload(workloads, &err)
        }
    }
}
