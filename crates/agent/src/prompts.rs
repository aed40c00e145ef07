//! Prompt rendering for each prediction operation.
//!
//! Each renderer returns `(system_directive, prompt)`. The system directive
//! always demands JSON-only replies; the prompt embeds the structured
//! payload plus the caller's instructions and spells out the exact fields
//! the reply must carry.

use serde_json::Value;

pub fn assignment(task: &Value, team: &[Value], instructions: &str) -> (String, String) {
    let team_summary: String = team
        .iter()
        .map(|member| {
            let skills = member
                .get("skills")
                .and_then(Value::as_array)
                .map(|s| {
                    s.iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!(
                "- {} (ID: {}): {} [Capacity: {}h, Assigned: {}h]",
                str_field(member, "name", "Unknown"),
                str_field(member, "id", "?"),
                skills,
                num_field(member, "capacity_hours"),
                num_field(member, "assigned_hours"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are an AI task assignment engine for a workspace management system.\n\
                  Always respond with valid JSON only, no markdown formatting or explanation."
        .to_string();

    let tags = task
        .get("tags")
        .and_then(Value::as_array)
        .map(|t| {
            t.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let prompt = format!(
        "Analyze this task and team to make an optimal assignment:\n\n\
         Task Details:\n\
         - Title: {}\n\
         - Description: {}\n\
         - Complexity: {}\n\
         - Tags: {}\n\
         - Customer: {}\n\
         - Project: {}\n\n\
         Team Members:\n{}\n\n\
         {}\n\n\
         Return a JSON object with these exact fields:\n\
         {{\n\
           \"predicted_hours\": <float>,\n\
           \"best_member_id\": \"<string>\",\n\
           \"priority\": <int 1-5>,\n\
           \"deadline\": \"<YYYY-MM-DD>\",\n\
           \"flowchart_next_step\": \"<Requirements|Design|Development|Testing|Review|Deployment>\",\n\
           \"required_meeting\": <boolean>,\n\
           \"meeting_suggestion\": {{\"attendees\": [\"<id>\"], \"duration\": <minutes>, \"day\": \"<YYYY-MM-DD>\"}} or null,\n\
           \"reason\": \"<brief explanation>\"\n\
         }}",
        str_field(task, "title", "N/A"),
        str_field(task, "description", "N/A"),
        str_field(task, "complexity", "medium"),
        tags,
        str_field(task, "customer_name", "N/A"),
        str_field(task, "project_name", "N/A"),
        team_summary,
        instructions,
    );

    (system, prompt)
}

pub fn summarize(messages: &[Value], instructions: &str) -> (String, String) {
    let transcript: String = messages
        .iter()
        .map(|msg| {
            format!(
                "[{}]: {}",
                str_field(msg, "sender_id", "Unknown"),
                str_field(msg, "text", ""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are a chat summarizer. Always respond with valid JSON only.".to_string();
    let prompt = format!(
        "Summarize this conversation:\n\n{transcript}\n\n{instructions}\n\n\
         Return JSON:\n\
         {{\n\
           \"bullets\": [\"<point 1>\", \"<point 2>\", \"<point 3>\"],\n\
           \"status\": \"<current status>\",\n\
           \"next_step\": \"<recommended action>\"\n\
         }}"
    );

    (system, prompt)
}

pub fn overload(workloads: &[Value], instructions: &str) -> (String, String) {
    let summary: String = workloads
        .iter()
        .map(|w| {
            let utilization = w.get("utilization").and_then(Value::as_f64).unwrap_or(0.0);
            format!(
                "- {}: {:.0}% utilization",
                str_field(w, "name", "Unknown"),
                utilization * 100.0,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are a workload analyst. Always respond with valid JSON only.".to_string();
    let prompt = format!(
        "Analyze team workload and identify overloaded members:\n\n{summary}\n\n{instructions}\n\n\
         Return JSON:\n\
         {{\n\
           \"overloaded\": [{{\"name\": \"<name>\", \"utilization\": <float 0-1>}}],\n\
           \"suggestions\": [\"<fix 1>\", \"<fix 2>\"]\n\
         }}"
    );

    (system, prompt)
}

pub fn meeting(context: &Value, instructions: &str) -> (String, String) {
    let system = "You are a meeting scheduler AI. Always respond with valid JSON only.".to_string();
    let prompt = format!(
        "Based on this context, suggest a meeting:\n\n{}\n\n{instructions}\n\n\
         Return JSON:\n\
         {{\n\
           \"attendees\": [\"<member_id>\"],\n\
           \"duration\": <minutes>,\n\
           \"day\": \"<YYYY-MM-DD>\",\n\
           \"reason\": \"<why this meeting is needed>\"\n\
         }}",
        pretty(context),
    );

    (system, prompt)
}

pub fn flowchart(task: &Value, instructions: &str) -> (String, String) {
    let system = "You are a workflow prediction AI. Always respond with valid JSON only.".to_string();
    let prompt = format!(
        "Analyze this task and predict the next workflow step:\n\n{}\n\n{instructions}\n\n\
         Return JSON:\n\
         {{\n\
           \"flowchart_next_step\": \"<Requirements|Design|Development|Testing|Review|Deployment>\",\n\
           \"blockers\": [\"<blocker 1>\"],\n\
           \"recommended_action\": \"<what to do next>\"\n\
         }}",
        pretty(task),
    );

    (system, prompt)
}

fn str_field<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

fn num_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assignment_prompt_lists_team_and_task() {
        let task = json!({"title": "Build importer", "complexity": "high", "tags": ["etl"]});
        let team = vec![json!({
            "id": "u1", "name": "Ana", "skills": ["rust"],
            "capacity_hours": 40.0, "assigned_hours": 10.0
        })];
        let (system, prompt) = assignment(&task, &team, "Pick wisely.");

        assert!(system.contains("JSON only"));
        assert!(prompt.contains("Build importer"));
        assert!(prompt.contains("- Ana (ID: u1): rust [Capacity: 40h, Assigned: 10h]"));
        assert!(prompt.contains("Pick wisely."));
        assert!(prompt.contains("\"predicted_hours\""));
    }

    #[test]
    fn overload_prompt_renders_percentages() {
        let workloads = vec![json!({"name": "Bo", "utilization": 0.75})];
        let (_, prompt) = overload(&workloads, "");
        assert!(prompt.contains("- Bo: 75% utilization"));
    }
}
