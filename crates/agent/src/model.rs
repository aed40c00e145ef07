//! Model backend abstraction and the Gemini REST implementation.

use async_trait::async_trait;
use serde_json::{json, Value};

/// Errors from the outbound model call.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model endpoint could not be reached (network, DNS, timeout).
    #[error("model endpoint unreachable: {0}")]
    Unreachable(String),

    /// The model API answered with a non-2xx status.
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The reply did not contain any text candidate.
    #[error("model reply contained no text: {0}")]
    Decode(String),
}

/// A text-in/text-out generative backend.
///
/// The orchestrator is agnostic about what sits behind this trait; tests
/// script it with canned replies.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Render a completion for `prompt` under the given system directive.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ModelError>;
}

/// Gemini `generateContent` REST client.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "systemInstruction": { "parts": [{ "text": system }] },
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 2048,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        extract_reply_text(&reply)
            .ok_or_else(|| ModelError::Decode(format!("no candidate text in {reply}")))
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_reply_text(reply: &Value) -> Option<String> {
    let parts = reply
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
