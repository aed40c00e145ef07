//! Route definitions for meetings.

use axum::routing::get;
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Meeting routes mounted at `/meetings`.
///
/// ```text
/// GET    /            -> list_meetings
/// POST   /            -> create_meeting
/// GET    /{id}/ics    -> meeting_ics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(meetings::list_meetings).post(meetings::create_meeting),
        )
        .route("/{id}/ics", get(meetings::meeting_ics))
}
