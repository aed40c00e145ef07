//! Route definitions for user profiles.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /          -> list_users
/// GET    /me        -> get_me
/// PATCH  /me        -> update_me
/// POST   /invite    -> invite_user (admin/manager)
/// PATCH  /{id}      -> update_user (admin/manager, or self)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", get(users::get_me).patch(users::update_me))
        .route("/invite", post(users::invite_user))
        .route("/{id}", patch(users::update_user))
}
