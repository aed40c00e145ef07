//! Per-operation default tables.
//!
//! Every prediction endpoint promises a fixed output shape: after the model
//! reply is parsed (or the raw-response fallback substituted), these
//! functions make sure each declared field is present and of the declared
//! type. Mis-typed values are replaced, not repaired. Nullable fields
//! (`best_member_id`, `meeting_suggestion`) accept an explicit null.

use serde_json::{json, Map, Value};

/// Defaults for `/assignment` replies.
pub fn assignment(result: &mut Map<String, Value>, team: &[Value]) {
    let best_member_ok = matches!(
        result.get("best_member_id"),
        Some(Value::String(_)) | Some(Value::Null)
    );
    if !best_member_ok {
        let first = team
            .first()
            .and_then(|member| member.get("id"))
            .cloned()
            .unwrap_or(Value::Null);
        result.insert("best_member_id".into(), first);
    }

    ensure_f64(result, "predicted_hours", 8.0);
    ensure_i64(result, "priority", 3);
    ensure_string_with(result, "deadline", || {
        days_from_now(7).format("%Y-%m-%d").to_string()
    });
    ensure_string(result, "flowchart_next_step", "Development");
    ensure_bool(result, "required_meeting", false);

    let suggestion_ok = matches!(
        result.get("meeting_suggestion"),
        Some(Value::Object(_)) | Some(Value::Null)
    );
    if !suggestion_ok {
        result.insert("meeting_suggestion".into(), Value::Null);
    }

    ensure_string(
        result,
        "reason",
        "AI assignment based on team skills and workload",
    );
}

/// Defaults for `/summarize` replies.
pub fn summarize(result: &mut Map<String, Value>) {
    ensure_array_with(result, "bullets", || json!(["Summary not available"]));
    ensure_string(result, "status", "In progress");
    ensure_string(result, "next_step", "Continue execution");
}

/// Defaults for `/overload` replies. The fallback ranking is computed
/// locally from the request's workload list.
pub fn overload(result: &mut Map<String, Value>, workloads: &[Value]) {
    ensure_array_with(result, "overloaded", || {
        Value::Array(crewdesk_core::workload::top_overloaded(workloads, 3))
    });
    ensure_array_with(result, "suggestions", || {
        json!([
            "Reassign tasks to balance workload",
            "Consider extending deadlines",
        ])
    });
}

/// Defaults for `/meeting` replies.
pub fn meeting(result: &mut Map<String, Value>) {
    ensure_i64(result, "duration", 30);
    ensure_string_with(result, "day", || {
        days_from_now(1).format("%Y-%m-%d").to_string()
    });
    ensure_string(result, "reason", "Team sync recommended");
    ensure_array_with(result, "attendees", || json!([]));
}

/// Defaults for `/flowchart` replies.
pub fn flowchart(result: &mut Map<String, Value>) {
    ensure_string(result, "flowchart_next_step", "Development");
    ensure_array_with(result, "blockers", || json!([]));
    ensure_string(result, "recommended_action", "Continue with current step");
}

fn days_from_now(days: u64) -> chrono::NaiveDate {
    chrono::Utc::now().date_naive() + chrono::Days::new(days)
}

fn ensure_f64(map: &mut Map<String, Value>, key: &str, default: f64) {
    if map.get(key).and_then(Value::as_f64).is_none() {
        map.insert(key.into(), json!(default));
    }
}

fn ensure_i64(map: &mut Map<String, Value>, key: &str, default: i64) {
    if map.get(key).and_then(Value::as_i64).is_none() {
        map.insert(key.into(), json!(default));
    }
}

fn ensure_bool(map: &mut Map<String, Value>, key: &str, default: bool) {
    if map.get(key).and_then(Value::as_bool).is_none() {
        map.insert(key.into(), json!(default));
    }
}

fn ensure_string(map: &mut Map<String, Value>, key: &str, default: &str) {
    if !matches!(map.get(key), Some(Value::String(_))) {
        map.insert(key.into(), Value::String(default.to_string()));
    }
}

fn ensure_string_with(map: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> String) {
    if !matches!(map.get(key), Some(Value::String(_))) {
        map.insert(key.into(), Value::String(default()));
    }
}

fn ensure_array_with(map: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> Value) {
    if !matches!(map.get(key), Some(Value::Array(_))) {
        map.insert(key.into(), default());
    }
}
