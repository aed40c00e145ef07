use std::sync::Arc;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::model::ModelBackend;

/// Shared orchestrator state.
///
/// `backend` is `None` when no API key is configured; prediction endpoints
/// then answer 503 while `/health` keeps reporting the situation.
#[derive(Clone)]
pub struct AgentState {
    pub backend: Option<Arc<dyn ModelBackend>>,
    pub config: Arc<AgentConfig>,
}

impl AgentState {
    pub fn new(backend: Option<Arc<dyn ModelBackend>>, config: AgentConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// The configured backend, or [`AgentError::Unconfigured`].
    pub fn backend(&self) -> Result<&Arc<dyn ModelBackend>, AgentError> {
        self.backend.as_ref().ok_or(AgentError::Unconfigured)
    }

    /// Auth method reported by `/health`.
    pub fn auth_method(&self) -> &'static str {
        if self.backend.is_some() {
            "api_key"
        } else {
            "none"
        }
    }
}
