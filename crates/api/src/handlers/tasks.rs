//! Task handlers.
//!
//! Task creation runs the assignment orchestration synchronously but treats
//! it as best-effort: an unreachable orchestrator leaves a labelled
//! `ai_reason` on the task instead of failing the request. Auto-assign is
//! the opposite -- an explicit user action that reports 503 when the
//! orchestrator is down.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use validator::Validate;

use crewdesk_assist::AssignmentPrediction;
use crewdesk_core::domain::{collections, TaskCreate, TaskStatus, TaskUpdate};
use crewdesk_core::types::now_iso;
use crewdesk_store::ListQuery;

use super::{activity_entry, activity_log_of};
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    pub status: Option<String>,
    pub priority: Option<i64>,
}

/// GET /tasks
///
/// List tasks newest-first, optionally filtered by status and/or priority.
pub async fn list_tasks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let mut query = ListQuery::new().order_by_desc("created_at");
    if let Some(status) = &params.status {
        query = query.filter("status", status.as_str());
    }
    if let Some(priority) = params.priority {
        query = query.filter("priority", priority);
    }

    let tasks = state.store.list(collections::TASKS, &query).await?;
    Ok(Json(tasks))
}

/// POST /tasks
///
/// Create a task: server timestamps, creator bookkeeping, then a synchronous
/// assignment prediction merged in when the orchestrator answers.
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<TaskCreate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let now = now_iso();
    let mut payload = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let task = payload
        .as_object_mut()
        .ok_or_else(|| AppError::Internal("task payload must be an object".into()))?;

    task.insert("created_at".into(), json!(now));
    task.insert("updated_at".into(), json!(now));
    task.insert("created_by".into(), json!(auth.user_id));
    task.insert("status".into(), json!(TaskStatus::Open.as_str()));
    task.insert("watchers".into(), json!([auth.user_id]));
    task.insert(
        "activity_log".into(),
        json!([activity_entry(&now, &auth.user_id, "Task created")]),
    );

    let team = state
        .store
        .list(collections::USERS, &ListQuery::new())
        .await?;

    match state.assist.predict_assignment(&payload, &team).await {
        Ok(prediction) => {
            if let Some(task) = payload.as_object_mut() {
                apply_prediction(task, &prediction);
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Creating task without AI prediction");
            if let Some(task) = payload.as_object_mut() {
                task.insert("ai_reason".into(), json!(format!("AI unavailable: {err}")));
            }
        }
    }

    let created = state.store.create(collections::TASKS, payload).await?;
    tracing::info!(
        task_id = created["id"].as_str().unwrap_or(""),
        user_id = %auth.user_id,
        "Task created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /tasks/{id}
pub async fn get_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let task = state
        .store
        .get(collections::TASKS, &task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id.clone()))?;
    Ok(Json(task))
}

/// PATCH /tasks/{id}
///
/// Merge supplied fields, append an activity entry, refresh `updated_at`,
/// and make the editor a watcher when a watcher list is supplied.
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    AppJson(input): AppJson<TaskUpdate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = state
        .store
        .get(collections::TASKS, &task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id.clone()))?;

    let now = now_iso();
    let mut payload = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let patch = payload
        .as_object_mut()
        .ok_or_else(|| AppError::Internal("task patch must be an object".into()))?;

    patch.insert("updated_at".into(), json!(now));

    let mut log = activity_log_of(&existing);
    log.push(activity_entry(&now, &auth.user_id, "Task updated"));
    patch.insert("activity_log".into(), json!(log));

    // Editing a task implies watching it: a supplied watcher list always
    // gains the acting user.
    let supplied = patch.get("watchers").and_then(Value::as_array).cloned();
    if let Some(supplied) = supplied {
        let mut watchers: Vec<String> = Vec::new();
        for watcher in supplied.iter().filter_map(Value::as_str) {
            if !watchers.iter().any(|w| w == watcher) {
                watchers.push(watcher.to_string());
            }
        }
        if !watchers.iter().any(|w| w == &auth.user_id) {
            watchers.push(auth.user_id.clone());
        }
        patch.insert("watchers".into(), json!(watchers));
    }

    let updated = state
        .store
        .merge_write(collections::TASKS, &task_id, payload)
        .await?;

    tracing::info!(task_id = %task_id, user_id = %auth.user_id, "Task updated");
    Ok(Json(updated))
}

/// POST /tasks/{id}/auto-assign
///
/// Re-run the assignment orchestration for an existing task. Unlike task
/// creation this is an explicit user action: an unreachable orchestrator is
/// reported as 503, never silently ignored.
pub async fn auto_assign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let task = state
        .store
        .get(collections::TASKS, &task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id.clone()))?;

    let team = state
        .store
        .list(collections::USERS, &ListQuery::new())
        .await?;

    let prediction = state
        .assist
        .predict_assignment(&task, &team)
        .await
        .map_err(|err| {
            AppError::ServiceUnavailable(format!("AI agent not available: {err}"))
        })?;

    let now = now_iso();
    let mut patch = Map::new();
    apply_prediction(&mut patch, &prediction);
    patch.insert("updated_at".into(), json!(now));

    let mut log = activity_log_of(&task);
    log.push(activity_entry(&now, &auth.user_id, "Auto-assigned"));
    patch.insert("activity_log".into(), json!(log));

    let updated = state
        .store
        .merge_write(collections::TASKS, &task_id, Value::Object(patch))
        .await?;

    tracing::info!(
        task_id = %task_id,
        assigned_to = updated["assigned_to"].as_str().unwrap_or(""),
        user_id = %auth.user_id,
        "Task auto-assigned",
    );
    Ok(Json(updated))
}

/// Merge an orchestrator prediction into a task document.
///
/// `predicted_hours`, `assigned_to`, and `ai_reason` are always written
/// (possibly null); `priority`, `deadline`, and `flowchart_step` only
/// overwrite when the prediction carries a value, leaving the task's own
/// fields in place otherwise.
fn apply_prediction(task: &mut Map<String, Value>, prediction: &AssignmentPrediction) {
    task.insert("predicted_hours".into(), json!(prediction.predicted_hours));
    task.insert("assigned_to".into(), json!(prediction.best_member_id));
    if let Some(priority) = prediction.priority {
        task.insert("priority".into(), json!(priority));
    }
    if let Some(deadline) = &prediction.deadline {
        task.insert("deadline".into(), json!(deadline));
    }
    if let Some(step) = &prediction.flowchart_next_step {
        task.insert("flowchart_step".into(), json!(step));
    }
    task.insert("ai_reason".into(), json!(prediction.reason));

    if prediction.required_meeting.unwrap_or(false) {
        if let Some(suggestion) = &prediction.meeting_suggestion {
            task.insert("meeting_suggestion".into(), json!(suggestion));
        }
    }
}
