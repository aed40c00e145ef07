//! Route definitions for AI queries.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::agent;
use crate::state::AppState;

/// AI query routes mounted at `/agent`.
///
/// ```text
/// GET    /who-is-overloaded    -> who_is_overloaded
/// POST   /workload             -> workload_report
/// POST   /meeting-suggestion   -> meeting_suggestion
/// POST   /flowchart            -> flowchart_prediction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/who-is-overloaded", get(agent::who_is_overloaded))
        .route("/workload", post(agent::workload_report))
        .route("/meeting-suggestion", post(agent::meeting_suggestion))
        .route("/flowchart", post(agent::flowchart_prediction))
}
