use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::model::ModelError;

/// Error type for orchestrator handlers.
///
/// Every response body is `{"detail": "..."}` so gateway-side callers see
/// one consistent shape.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No model backend is configured (missing API key).
    #[error("Model backend not configured. Set GEMINI_API_KEY in the environment.")]
    Unconfigured,

    /// The outbound model call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The request body was malformed.
    #[error("Invalid request body: {0}")]
    Validation(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl From<JsonRejection> for AgentError {
    fn from(rejection: JsonRejection) -> Self {
        AgentError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AgentError::Unconfigured => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AgentError::Model(err) => {
                tracing::error!(error = %err, "Model call failed");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AgentError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
