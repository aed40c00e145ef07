//! Route definitions for tasks.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes mounted at `/tasks`.
///
/// ```text
/// GET    /                  -> list_tasks
/// POST   /                  -> create_task
/// GET    /{id}              -> get_task
/// PATCH  /{id}              -> update_task
/// POST   /{id}/auto-assign  -> auto_assign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/{id}", get(tasks::get_task).patch(tasks::update_task))
        .route("/{id}/auto-assign", post(tasks::auto_assign))
}
