//! Entity DTOs and enums for the five document collections.
//!
//! Documents themselves are schemaless [`serde_json::Value`] objects so that
//! unknown fields survive merge-writes; the types here validate what clients
//! send and what the server stamps onto documents. Partial-update DTOs skip
//! `None` fields on serialization so only supplied fields reach the merge.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Collection names in the document store.
pub mod collections {
    pub const TASKS: &str = "tasks";
    pub const MESSAGES: &str = "messages";
    pub const USERS: &str = "users";
    pub const MEETINGS: &str = "meetings";
    pub const UPDATES: &str = "updates";
}

/// Task complexity supplied by the creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    InReview,
    Blocked,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::InReview => "in_review",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Completed => "completed",
        }
    }
}

/// User availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Busy,
    OnLeave,
}

/// Priority of a status-update broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePriority {
    Low,
    Medium,
    High,
}

/// One append-only entry in a task's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub actor: String,
    pub action: String,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub complexity: Complexity,
    #[validate(range(min = 1, max = 5, message = "priority must be between 1 and 5"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowchart_step: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub prd_url: String,
}

/// Request body for `PATCH /tasks/{id}`. Only supplied fields are merged.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[validate(range(min = 1, max = 5, message = "priority must be between 1 and 5"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowchart_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<Vec<String>>,
}

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct MessageCreate {
    #[validate(length(min = 1, message = "task_id must not be empty"))]
    pub task_id: String,
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Request body for `PATCH /users/me` and `PATCH /users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// Request body for `POST /users/invite`.
#[derive(Debug, Deserialize, Validate)]
pub struct InviteUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default = "default_invite_role")]
    pub role: String,
    #[serde(default)]
    pub name: String,
}

fn default_invite_role() -> String {
    crate::roles::ROLE_EMPLOYEE.to_string()
}

/// Request body for `POST /meetings`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct MeetingCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub attendees: Vec<String>,
    /// ISO-8601 datetime, with or without a UTC offset.
    pub date: String,
    #[serde(default = "default_meeting_duration")]
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_url: Option<String>,
}

fn default_meeting_duration() -> i64 {
    30
}

/// Request body for `POST /updates`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateCreate {
    pub priority: UpdatePriority,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}
