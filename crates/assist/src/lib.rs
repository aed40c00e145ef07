//! HTTP client for the assignment orchestrator, used by the gateway.
//!
//! The orchestrator is treated as a best-effort collaborator: every method
//! returns a typed error that call sites either swallow (substituting a
//! labelled fallback from [`fallback`]) or surface as ServiceUnavailable,
//! depending on whether the operation is an enhancement or an explicit user
//! action.

pub mod client;
pub mod fallback;
pub mod types;

pub use client::{AgentClient, AssistError};
pub use types::{AssignmentPrediction, MeetingSuggestion};
