//! Handlers for the five prediction endpoints and the health probe.

use axum::extract::{FromRequest, Request, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgentError, AgentResult};
use crate::state::AgentState;
use crate::{defaults, extract, prompts};

/// `Json` wrapper whose rejection produces the `{"detail": ...}` error shape.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AgentError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub task: Value,
    #[serde(default)]
    pub team: Vec<Value>,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct OverloadRequest {
    #[serde(default)]
    pub workloads: Vec<Value>,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct MeetingRequest {
    pub context: Value,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct FlowchartRequest {
    pub task: Value,
    #[serde(default)]
    pub instructions: String,
}

/// POST /assignment -- predict who should take a task.
pub async fn predict_assignment(
    State(state): State<AgentState>,
    AppJson(req): AppJson<AssignmentRequest>,
) -> AgentResult<Json<Value>> {
    let backend = state.backend()?;
    let (system, prompt) = prompts::assignment(&req.task, &req.team, &req.instructions);
    let reply = backend.generate(&system, &prompt).await?;

    let mut result = extract::parse_reply(&reply);
    defaults::assignment(&mut result, &req.team);

    tracing::info!(team_size = req.team.len(), "Assignment predicted");
    Ok(Json(Value::Object(result)))
}

/// POST /summarize -- condense a chat transcript.
pub async fn summarize_chat(
    State(state): State<AgentState>,
    AppJson(req): AppJson<SummarizeRequest>,
) -> AgentResult<Json<Value>> {
    let backend = state.backend()?;
    let (system, prompt) = prompts::summarize(&req.messages, &req.instructions);
    let reply = backend.generate(&system, &prompt).await?;

    let mut result = extract::parse_reply(&reply);
    defaults::summarize(&mut result);

    Ok(Json(Value::Object(result)))
}

/// POST /overload -- rank overloaded team members.
pub async fn overload_report(
    State(state): State<AgentState>,
    AppJson(req): AppJson<OverloadRequest>,
) -> AgentResult<Json<Value>> {
    let backend = state.backend()?;
    let (system, prompt) = prompts::overload(&req.workloads, &req.instructions);
    let reply = backend.generate(&system, &prompt).await?;

    let mut result = extract::parse_reply(&reply);
    defaults::overload(&mut result, &req.workloads);

    Ok(Json(Value::Object(result)))
}

/// POST /meeting -- suggest a meeting for a context.
pub async fn suggest_meeting(
    State(state): State<AgentState>,
    AppJson(req): AppJson<MeetingRequest>,
) -> AgentResult<Json<Value>> {
    let backend = state.backend()?;
    let (system, prompt) = prompts::meeting(&req.context, &req.instructions);
    let reply = backend.generate(&system, &prompt).await?;

    let mut result = extract::parse_reply(&reply);
    defaults::meeting(&mut result);

    Ok(Json(Value::Object(result)))
}

/// POST /flowchart -- predict the next workflow step.
pub async fn flowchart_prediction(
    State(state): State<AgentState>,
    AppJson(req): AppJson<FlowchartRequest>,
) -> AgentResult<Json<Value>> {
    let backend = state.backend()?;
    let (system, prompt) = prompts::flowchart(&req.task, &req.instructions);
    let reply = backend.generate(&system, &prompt).await?;

    let mut result = extract::parse_reply(&reply);
    defaults::flowchart(&mut result);

    Ok(Json(Value::Object(result)))
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backend_configured: bool,
    pub auth_method: &'static str,
    pub model: String,
}

/// GET /health -- reports whether a model backend is wired up.
pub async fn health(State(state): State<AgentState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend_configured: state.backend.is_some(),
        auth_method: state.auth_method(),
        model: state.config.model.clone(),
    })
}
