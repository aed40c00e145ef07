/// Orchestrator configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8081`).
    pub port: u16,
    /// Model identifier sent to the generative API.
    pub model: String,
    /// API key; absent means no backend is configured and prediction
    /// endpoints answer 503.
    pub api_key: Option<String>,
    /// Base URL of the generative API.
    pub api_base_url: String,
    /// Outbound model-call timeout in seconds (default: `30`).
    pub model_timeout_secs: u64,
}

impl AgentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                                        |
    /// |----------------------|------------------------------------------------|
    /// | `HOST`               | `0.0.0.0`                                      |
    /// | `PORT`               | `8081`                                         |
    /// | `GEMINI_MODEL`       | `gemini-2.0-flash`                             |
    /// | `GEMINI_API_KEY`     | *(unset: backend unconfigured)*                |
    /// | `GEMINI_API_BASE_URL`| `https://generativelanguage.googleapis.com`    |
    /// | `MODEL_TIMEOUT_SECS` | `30`                                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8081".into())
            .parse()
            .expect("PORT must be a valid u16");

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into());

        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let api_base_url = std::env::var("GEMINI_API_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into());

        let model_timeout_secs: u64 = std::env::var("MODEL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("MODEL_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            model,
            api_key,
            api_base_url,
            model_timeout_secs,
        }
    }
}
