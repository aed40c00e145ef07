//! Request handlers, one module per resource.

pub mod agent;
pub mod attachments;
pub mod meetings;
pub mod messages;
pub mod tasks;
pub mod updates;
pub mod users;

use serde_json::{json, Value};

/// A task's activity log as an owned list (empty when absent or mis-shaped).
pub(crate) fn activity_log_of(task: &Value) -> Vec<Value> {
    task.get("activity_log")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// A task's watcher list as owned strings.
pub(crate) fn watchers_of(task: &Value) -> Vec<String> {
    task.get("watchers")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Build one activity-log entry.
pub(crate) fn activity_entry(timestamp: &str, actor: &str, action: &str) -> Value {
    json!({
        "timestamp": timestamp,
        "actor": actor,
        "action": action,
    })
}
