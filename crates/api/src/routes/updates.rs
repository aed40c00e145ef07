//! Route definitions for status updates.

use axum::routing::get;
use axum::Router;

use crate::handlers::updates;
use crate::state::AppState;

/// Status-update routes mounted at `/updates`.
///
/// ```text
/// GET    /   -> list_updates
/// POST   /   -> create_update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(updates::list_updates).post(updates::create_update),
    )
}
