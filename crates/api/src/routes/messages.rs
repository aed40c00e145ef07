//! Route definitions for task messages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Message routes mounted at `/messages`.
///
/// ```text
/// POST   /                       -> create_message
/// GET    /{task_id}              -> list_messages
/// POST   /{task_id}/summarize    -> summarize
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::create_message))
        .route("/{task_id}", get(messages::list_messages))
        .route("/{task_id}/summarize", post(messages::summarize))
}
