//! Role names stored on user profiles.
//!
//! Privileged mutations (inviting users, editing other profiles) require one
//! of [`PRIVILEGED_ROLES`]. Roles live on the stored profile, not in the
//! bearer token, so a requester whose profile cannot be loaded has no role to
//! check against.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Roles allowed to invite users and edit profiles other than their own.
pub const PRIVILEGED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER];
