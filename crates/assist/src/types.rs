use serde::{Deserialize, Serialize};

/// Result of the orchestrator's `/assignment` endpoint.
///
/// The orchestrator guarantees every field is present in its reply; the
/// options here absorb nulls (`best_member_id` is null for an empty team).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentPrediction {
    #[serde(default)]
    pub predicted_hours: Option<f64>,
    #[serde(default)]
    pub best_member_id: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub flowchart_next_step: Option<String>,
    #[serde(default)]
    pub required_meeting: Option<bool>,
    #[serde(default)]
    pub meeting_suggestion: Option<MeetingSuggestion>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Meeting proposal attached to an assignment prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSuggestion {
    #[serde(default)]
    pub attendees: Vec<String>,
    pub duration: i64,
    pub day: String,
}
