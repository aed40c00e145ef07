use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AgentState;

/// Build the orchestrator route tree.
///
/// ```text
/// GET  /health      -> health
/// POST /assignment  -> predict_assignment
/// POST /summarize   -> summarize_chat
/// POST /overload    -> overload_report
/// POST /meeting     -> suggest_meeting
/// POST /flowchart   -> flowchart_prediction
/// ```
pub fn router(state: AgentState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/assignment", post(handlers::predict_assignment))
        .route("/summarize", post(handlers::summarize_chat))
        .route("/overload", post(handlers::overload_report))
        .route("/meeting", post(handlers::suggest_meeting))
        .route("/flowchart", post(handlers::flowchart_prediction))
        .with_state(state)
}
