//! Route definitions for attachment uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::attachments;
use crate::state::AppState;

/// Attachment routes mounted at `/attachments`.
///
/// ```text
/// POST   /signed-url   -> generate_signed_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/signed-url", post(attachments::generate_signed_url))
}
