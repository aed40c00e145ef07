//! Status-update broadcast handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crewdesk_core::domain::{collections, UpdateCreate};
use crewdesk_core::types::now_iso;
use crewdesk_store::ListQuery;

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;

/// Query parameters for `GET /updates`.
#[derive(Debug, Deserialize)]
pub struct UpdateListParams {
    pub limit: Option<usize>,
}

/// GET /updates
///
/// Most recent broadcasts first, up to `limit` (default 20).
pub async fn list_updates(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UpdateListParams>,
) -> AppResult<impl IntoResponse> {
    let updates = state
        .store
        .list(
            collections::UPDATES,
            &ListQuery::new()
                .order_by_desc("created_at")
                .limit(params.limit.unwrap_or(DEFAULT_LIMIT)),
        )
        .await?;
    Ok(Json(updates))
}

/// POST /updates
pub async fn create_update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateCreate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut payload = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(update) = payload.as_object_mut() {
        update.insert("user_id".into(), json!(auth.user_id));
        update.insert("user_name".into(), json!(auth.name));
        update.insert("created_at".into(), json!(now_iso()));
    }

    let created = state.store.create(collections::UPDATES, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
