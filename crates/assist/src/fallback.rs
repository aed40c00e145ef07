//! Synthetic fallback objects substituted when the orchestrator is
//! unavailable.
//!
//! Each fallback matches the corresponding endpoint's full output shape and
//! carries a `note` field labelling why it was synthesized, mirroring the
//! `ai_reason = "AI unavailable: …"` convention on tasks.

use serde_json::{json, Value};

use crate::AssistError;

/// Fallback chat summary.
pub fn summary(err: &AssistError) -> Value {
    json!({
        "bullets": ["Summary not available"],
        "status": "In progress",
        "next_step": "Continue execution",
        "note": label(err),
    })
}

/// Fallback overload report: top three workloads by utilization, ranked
/// locally from the same list that would have been sent to the model.
pub fn overload(workloads: &[Value], err: &AssistError) -> Value {
    json!({
        "overloaded": crewdesk_core::workload::top_overloaded(workloads, 3),
        "suggestions": [
            "Reassign tasks to balance workload",
            "Consider extending deadlines",
        ],
        "note": label(err),
    })
}

/// Fallback meeting suggestion: a half-hour sync tomorrow.
pub fn meeting(err: &AssistError) -> Value {
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Days::new(1);
    json!({
        "attendees": [],
        "duration": 30,
        "day": tomorrow.format("%Y-%m-%d").to_string(),
        "reason": "Team sync recommended",
        "note": label(err),
    })
}

/// Fallback flowchart prediction.
pub fn flowchart(err: &AssistError) -> Value {
    json!({
        "flowchart_next_step": "Development",
        "blockers": [],
        "recommended_action": "Continue with current step",
        "note": label(err),
    })
}

fn label(err: &AssistError) -> String {
    format!("AI unavailable: {err}")
}
