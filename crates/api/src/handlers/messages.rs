//! Message handlers.
//!
//! Posting a message touches two documents: the message itself, then a
//! merge-write on the parent task (activity entry, `updated_at`, watcher
//! union). The two writes are not atomic; concurrent posts to the same task
//! race last-write-wins on the task document.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crewdesk_core::domain::{collections, MessageCreate};
use crewdesk_core::types::now_iso;
use crewdesk_store::ListQuery;

use super::{activity_entry, activity_log_of, watchers_of};
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /messages/{task_id}
///
/// A task's messages, oldest-first.
pub async fn list_messages(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let messages = state
        .store
        .list(
            collections::MESSAGES,
            &ListQuery::new()
                .filter("task_id", task_id.as_str())
                .order_by("created_at"),
        )
        .await?;
    Ok(Json(messages))
}

/// POST /messages
///
/// Append a message to a task, then update the task's activity log and
/// watcher set. Every message author becomes a watcher of the task.
pub async fn create_message(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<MessageCreate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let task = state
        .store
        .get(collections::TASKS, &input.task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", input.task_id.clone()))?;

    let now = now_iso();
    let mut payload = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(message) = payload.as_object_mut() {
        message.insert("created_at".into(), json!(now));
        message.insert("sender_id".into(), json!(auth.user_id));
    }

    let message = state.store.create(collections::MESSAGES, payload).await?;

    let mut log = activity_log_of(&task);
    log.push(activity_entry(&now, &auth.user_id, "Commented on task"));

    let mut watchers = watchers_of(&task);
    if !watchers.iter().any(|w| w == &auth.user_id) {
        watchers.push(auth.user_id.clone());
    }

    state
        .store
        .merge_write(
            collections::TASKS,
            &input.task_id,
            json!({
                "activity_log": log,
                "updated_at": now,
                "watchers": watchers,
            }),
        )
        .await?;

    tracing::info!(task_id = %input.task_id, user_id = %auth.user_id, "Message posted");
    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /messages/{task_id}/summarize
///
/// Summarize a task's chat through the orchestrator; an unreachable
/// orchestrator yields the labelled fallback summary instead of an error.
pub async fn summarize(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let messages: Vec<Value> = state
        .store
        .list(
            collections::MESSAGES,
            &ListQuery::new()
                .filter("task_id", task_id.as_str())
                .order_by("created_at"),
        )
        .await?;

    let summary = match state.assist.summarize_chat(&messages).await {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "Summarizing without AI");
            crewdesk_assist::fallback::summary(&err)
        }
    };
    Ok(Json(summary))
}
