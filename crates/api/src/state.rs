use std::sync::Arc;

use crewdesk_assist::AgentClient;
use crewdesk_store::DocumentStore;

use crate::config::ServerConfig;
use crate::storage::UploadSigner;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Service handles are narrow capability interfaces injected here rather than
/// reached through globals, so tests can swap in an in-memory store or a
/// stubbed orchestrator. Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn DocumentStore>,
    /// Assignment orchestrator client.
    pub assist: Arc<AgentClient>,
    /// Presigned-URL issuer for attachment uploads.
    pub uploads: Arc<UploadSigner>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
