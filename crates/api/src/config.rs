use crate::auth::jwt::JwtConfig;

/// Gateway configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret, which must always be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins; `*` means any origin (without credentials).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`; task creation waits
    /// on the orchestrator, which itself waits on the model).
    pub request_timeout_secs: u64,
    /// JWT verification configuration.
    pub jwt: JwtConfig,
    /// Base URL of the assignment orchestrator.
    pub agent_base_url: String,
    /// Orchestrator call timeout in seconds (default: `30`).
    pub agent_timeout_secs: u64,
    /// Attachment upload storage.
    pub storage: StorageConfig,
}

/// Object storage settings for attachment uploads.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket receiving uploads.
    pub bucket: String,
    /// Bucket region.
    pub region: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `8000`                      |
    /// | `CORS_ORIGINS`         | `*`                         |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                        |
    /// | `AGENT_BASE_URL`       | `http://localhost:8081`     |
    /// | `AI_TIMEOUT_SECS`      | `30`                        |
    /// | `S3_BUCKET`            | `crewdesk-attachments`      |
    /// | `AWS_REGION`           | `us-east-1`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let agent_base_url =
            std::env::var("AGENT_BASE_URL").unwrap_or_else(|_| "http://localhost:8081".into());

        let agent_timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        let storage = StorageConfig {
            bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "crewdesk-attachments".into()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            agent_base_url,
            agent_timeout_secs,
            storage,
        }
    }
}
