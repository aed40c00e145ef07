//! Attachment upload handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /attachments/signed-url`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignedUrlRequest {
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub filename: String,
    #[validate(length(min = 1, message = "content_type must not be empty"))]
    pub content_type: String,
}

/// POST /attachments/signed-url
///
/// Issue a short-lived presigned PUT URL; the client uploads the bytes
/// directly to object storage.
pub async fn generate_signed_url(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<SignedUrlRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;

    let signed = state
        .uploads
        .presign_upload(&req.filename, &req.content_type)
        .await?;

    tracing::info!(filename = %req.filename, user_id = %auth.user_id, "Upload URL issued");
    Ok(Json(signed))
}
