pub mod agent;
pub mod attachments;
pub mod health;
pub mod meetings;
pub mod messages;
pub mod tasks;
pub mod updates;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree (mounted at the root, next to `/health`).
///
/// ```text
/// /tasks                    list, create
/// /tasks/{id}               get, patch
/// /tasks/{id}/auto-assign   re-run assignment (POST)
///
/// /messages                 create (POST)
/// /messages/{task_id}       list
/// /messages/{task_id}/summarize   AI summary (POST)
///
/// /attachments/signed-url   presigned upload URL (POST)
///
/// /agent/who-is-overloaded  roster overload ranking (GET)
/// /agent/workload           caller-supplied workload ranking (POST)
/// /agent/meeting-suggestion meeting proposal (POST)
/// /agent/flowchart          workflow-step prediction (POST)
///
/// /meetings                 list, create
/// /meetings/{id}/ics        calendar export (GET)
///
/// /users                    list
/// /users/me                 get, patch
/// /users/invite             invite (POST, admin/manager)
/// /users/{id}               patch (admin/manager, or self)
///
/// /updates                  list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", tasks::router())
        .nest("/messages", messages::router())
        .nest("/attachments", attachments::router())
        .nest("/agent", agent::router())
        .nest("/meetings", meetings::router())
        .nest("/users", users::router())
        .nest("/updates", updates::router())
}
