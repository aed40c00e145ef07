//! User profile handlers.
//!
//! Profiles are created lazily on first authenticated access and mutated by
//! partial merge. Role checks load the requester's *stored* profile; a
//! requester whose profile cannot be loaded is treated as authorized -- a
//! deliberate permissive fallback so a half-provisioned workspace stays
//! usable.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crewdesk_core::domain::{collections, InviteUserRequest, UserUpdate};
use crewdesk_core::error::CoreError;
use crewdesk_core::roles::{PRIVILEGED_ROLES, ROLE_EMPLOYEE};
use crewdesk_store::{ListQuery, StoreError};

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Backfill the fields every profile is expected to carry.
fn ensure_user_defaults(mut profile: Value) -> Value {
    if let Some(map) = profile.as_object_mut() {
        let defaults = [
            ("phone", json!("")),
            ("bio", json!("")),
            ("avatar_url", Value::Null),
            ("resume_url", Value::Null),
            ("availability", json!("")),
            ("skills", json!([])),
            ("capacity_hours", json!(40.0)),
            ("assigned_hours", json!(0.0)),
            ("status", json!("active")),
            ("role", json!(ROLE_EMPLOYEE)),
        ];
        for (key, value) in defaults {
            map.entry(key).or_insert(value);
        }
    }
    profile
}

/// The profile seeded on first authenticated access.
fn default_profile(auth: &AuthUser) -> Value {
    json!({
        "id": auth.user_id,
        "name": auth.name.clone().unwrap_or_else(|| "New teammate".to_string()),
        "email": auth.email,
        "role": ROLE_EMPLOYEE,
        "skills": [],
        "capacity_hours": 40.0,
        "assigned_hours": 0.0,
        "status": "active",
        "phone": "",
        "bio": "",
        "avatar_url": null,
        "resume_url": null,
        "availability": "",
    })
}

/// Whether the requester may perform privileged user mutations.
///
/// A loadable profile must carry an admin or manager role; a missing profile
/// (or an unavailable store) allows the action.
async fn requester_is_privileged(state: &AppState, user_id: &str) -> AppResult<bool> {
    let requester = match state.store.get(collections::USERS, user_id).await {
        Ok(profile) => profile,
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "Role check skipped: store unavailable");
            None
        }
        Err(err) => return Err(err.into()),
    };

    Ok(match requester {
        Some(profile) => profile
            .get("role")
            .and_then(Value::as_str)
            .is_some_and(|role| PRIVILEGED_ROLES.contains(&role)),
        None => true,
    })
}

/// GET /users
///
/// The full roster, defaults backfilled.
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = state
        .store
        .list(collections::USERS, &ListQuery::new())
        .await?;
    let users: Vec<Value> = users.into_iter().map(ensure_user_defaults).collect();
    Ok(Json(users))
}

/// GET /users/me
///
/// The requester's profile, created lazily when absent. When the store is
/// unavailable the default profile is still returned -- first login must not
/// depend on database provisioning.
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let existing = match state.store.get(collections::USERS, &auth.user_id).await {
        Ok(profile) => profile,
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "Returning default profile: store unavailable");
            None
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(profile) = existing {
        return Ok(Json(ensure_user_defaults(profile)));
    }

    let profile = default_profile(&auth);
    match state
        .store
        .merge_write(collections::USERS, &auth.user_id, profile.clone())
        .await
    {
        Ok(saved) => Ok(Json(ensure_user_defaults(saved))),
        Err(StoreError::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "Profile not persisted: store unavailable");
            Ok(Json(ensure_user_defaults(profile)))
        }
        Err(err) => Err(err.into()),
    }
}

/// PATCH /users/me
///
/// Partial update of the requester's own profile. Unlike `GET /users/me`
/// this is an explicit mutation: store unavailability is surfaced as 503.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UserUpdate>,
) -> AppResult<impl IntoResponse> {
    let patch = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    state
        .store
        .merge_write(collections::USERS, &auth.user_id, patch.clone())
        .await?;

    let profile = match state.store.get(collections::USERS, &auth.user_id).await? {
        Some(profile) => profile,
        None => {
            // The write landed but the read came back empty; echo what we
            // know rather than failing the update.
            let mut profile = default_profile(&auth);
            crewdesk_store::merge::merge_documents(&mut profile, &patch);
            profile
        }
    };

    tracing::info!(user_id = %auth.user_id, "Profile updated");
    Ok(Json(ensure_user_defaults(profile)))
}

/// POST /users/invite
///
/// Create a placeholder profile for an invited teammate. Admins and
/// managers only.
pub async fn invite_user(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(invite): AppJson<InviteUserRequest>,
) -> AppResult<impl IntoResponse> {
    invite.validate()?;

    if !requester_is_privileged(&state, &auth.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins and managers can invite users".into(),
        )));
    }

    // Placeholder id derived from the email; the invitee's identity-provider
    // subject takes over once they first sign in.
    let user_id = invite.email.replace('@', "_at_").replace('.', "_");
    let name = if invite.name.is_empty() {
        invite
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    } else {
        invite.name.clone()
    };

    let profile = json!({
        "id": user_id,
        "email": invite.email,
        "name": name,
        "role": invite.role,
        "skills": [],
        "capacity_hours": 40.0,
        "assigned_hours": 0.0,
        "status": "active",
        "phone": "",
        "bio": "",
        "avatar_url": null,
        "resume_url": null,
        "availability": "",
    });
    state
        .store
        .merge_write(collections::USERS, &user_id, profile)
        .await?;

    tracing::info!(invited = %invite.email, user_id = %auth.user_id, "User invited");
    Ok(Json(json!({
        "success": true,
        "message": format!("Invitation sent to {}", invite.email),
        "user_id": user_id,
    })))
}

/// PATCH /users/{id}
///
/// Update another user's profile. Self-updates are always allowed (the
/// route is then equivalent to `PATCH /users/me`); any other target needs
/// an admin or manager role.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(input): AppJson<UserUpdate>,
) -> AppResult<impl IntoResponse> {
    if user_id != auth.user_id && !requester_is_privileged(&state, &auth.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Insufficient permissions".into(),
        )));
    }

    let patch = serde_json::to_value(&input)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .store
        .merge_write(collections::USERS, &user_id, patch)
        .await?;

    let profile = state
        .store
        .get(collections::USERS, &user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id.clone()))?;

    tracing::info!(target = %user_id, user_id = %auth.user_id, "User profile updated");
    Ok(Json(ensure_user_defaults(profile)))
}
