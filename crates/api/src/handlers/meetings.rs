//! Meeting handlers, including the iCalendar export.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crewdesk_core::domain::{collections, MeetingCreate};
use crewdesk_core::types::now_iso;
use crewdesk_store::ListQuery;

use crate::error::{AppError, AppJson, AppResult};
use crate::ics;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /meetings`.
#[derive(Debug, Deserialize)]
pub struct MeetingListParams {
    pub task_id: Option<String>,
}

/// GET /meetings
///
/// Meetings by ascending date, optionally scoped to one task.
pub async fn list_meetings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MeetingListParams>,
) -> AppResult<impl IntoResponse> {
    let mut query = ListQuery::new().order_by("date");
    if let Some(task_id) = &params.task_id {
        query = query.filter("task_id", task_id.as_str());
    }

    let meetings = state.store.list(collections::MEETINGS, &query).await?;
    Ok(Json(meetings))
}

/// POST /meetings
pub async fn create_meeting(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<MeetingCreate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    // Reject unparseable dates up front; the ICS export relies on them.
    ics::parse_meeting_date(&input.date)?;

    let mut payload = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(meeting) = payload.as_object_mut() {
        meeting.insert("created_by".into(), json!(auth.user_id));
        meeting.insert("created_at".into(), json!(now_iso()));
    }

    let created = state.store.create(collections::MEETINGS, payload).await?;
    tracing::info!(
        meeting_id = created["id"].as_str().unwrap_or(""),
        user_id = %auth.user_id,
        "Meeting created",
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /meetings/{id}/ics
///
/// The meeting as a `text/calendar` document (single VEVENT).
pub async fn meeting_ics(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let meeting = state
        .store
        .get(collections::MEETINGS, &meeting_id)
        .await?
        .ok_or_else(|| AppError::not_found("Meeting", meeting_id.clone()))?;

    let body = ics::build_ics(&meeting)?;
    Ok(([(header::CONTENT_TYPE, "text/calendar")], body))
}
