//! REST client for the orchestrator's five prediction endpoints.

use std::time::Duration;

use serde_json::{json, Value};

use crate::types::AssignmentPrediction;

/// How many trailing chat messages are sent for summarization.
const SUMMARY_WINDOW: usize = 10;

/// HTTP client bound to one orchestrator instance.
pub struct AgentClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the orchestrator client. All three variants mean the caller
/// did not get a usable prediction; the variants exist so logs can tell a
/// dead service from a misbehaving one.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The service could not be reached (connection refused, DNS, timeout).
    #[error("assignment agent not reachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-2xx status.
    #[error("assignment agent error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The reply body was not the expected JSON shape.
    #[error("assignment agent returned an unexpected reply: {0}")]
    Decode(String),
}

impl AgentClient {
    /// Build a client for the orchestrator at `base_url`.
    ///
    /// The timeout covers the whole round trip, model call included; a call
    /// that outlives it is reported as [`AssistError::Unreachable`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON payload to an orchestrator path and decode the JSON reply.
    pub async fn post(&self, path: &str, payload: &Value) -> Result<Value, AssistError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                AssistError::Unreachable(format!("{} at {}", source_chain(&e), self.base_url))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AssistError::Decode(e.to_string()))
    }

    /// Ask for an assignment prediction for `task` given the `team` roster.
    pub async fn predict_assignment(
        &self,
        task: &Value,
        team: &[Value],
    ) -> Result<AssignmentPrediction, AssistError> {
        let payload = json!({
            "task": task,
            "team": team,
            "instructions": "Return JSON with predicted_hours, best_member_id, priority, \
                 deadline (YYYY-MM-DD), flowchart_next_step, required_meeting, \
                 meeting_suggestion {attendees,duration,day}, reason.",
        });
        let reply = self.post("/assignment", &payload).await?;
        serde_json::from_value(reply).map_err(|e| AssistError::Decode(e.to_string()))
    }

    /// Summarize the tail of a task's chat (last ten messages).
    pub async fn summarize_chat(&self, messages: &[Value]) -> Result<Value, AssistError> {
        let window_start = messages.len().saturating_sub(SUMMARY_WINDOW);
        let payload = json!({
            "messages": &messages[window_start..],
            "instructions": "Summarize into 3 bullets + status line + recommended next action.",
        });
        self.post("/summarize", &payload).await
    }

    /// Rank overloaded members from a workload list.
    pub async fn overload_report(&self, workloads: &[Value]) -> Result<Value, AssistError> {
        let payload = json!({
            "workloads": workloads,
            "instructions": "List top 3 overloaded members + 2 fixes.",
        });
        self.post("/overload", &payload).await
    }

    /// Suggest a meeting for a free-form context object.
    pub async fn suggest_meeting(&self, context: &Value) -> Result<Value, AssistError> {
        let payload = json!({
            "context": context,
            "instructions": "Recommend meeting with attendees, duration, day, and reason.",
        });
        self.post("/meeting", &payload).await
    }

    /// Predict the next workflow step for a task.
    pub async fn flowchart_prediction(&self, task: &Value) -> Result<Value, AssistError> {
        let payload = json!({
            "task": task,
            "instructions": "Predict next workflow step (Requirements, Design, Development, \
                 Testing, Review, Deployment) and list blockers + recommended action.",
        });
        self.post("/flowchart", &payload).await
    }
}

/// Flatten a reqwest error chain into one line (the top-level error alone is
/// usually just "error sending request").
fn source_chain(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}
