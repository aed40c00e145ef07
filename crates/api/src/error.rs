use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crewdesk_core::error::CoreError;
use crewdesk_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds gateway-specific variants.
/// Implements [`IntoResponse`] to produce the `{"detail": "..."}` JSON body
/// used by every error response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `crewdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An external collaborator (orchestrator, object storage) is down.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error with a human-readable cause.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Validation(msg.into()))
    }

    /// Shorthand for a missing document.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::Core(CoreError::NotFound {
            entity,
            id: id.into(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, core.to_string()),
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, core.to_string()),
                CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, core.to_string()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal server error: {msg}"),
                    )
                }
            },

            AppError::Store(err) => match err {
                StoreError::Unavailable(msg) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!(
                        "Document store not available. Create the database and point \
                         DATABASE_URL at it. Error: {msg}"
                    ),
                ),
                other => {
                    tracing::error!(error = %other, "Document store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal server error: {other}"),
                    )
                }
            },

            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {msg}"),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// `Json` extractor whose rejection produces the `{"detail": ...}` error
/// shape instead of axum's plain-text default.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
