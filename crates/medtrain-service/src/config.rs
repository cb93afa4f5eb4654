//! Service configuration.

use std::str::FromStr;

/// Default chat-completion endpoint.
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default chat model.
pub const DEFAULT_AI_MODEL: &str = "llama-3.3-70b-versatile";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:5045").
    pub listen_addr: String,

    /// Path to the SQLite database file (default: "medical_training.db").
    pub database_path: String,

    /// Root directory for uploaded media (default: "uploads").
    pub upload_dir: String,

    /// Shared admin password (default: "q1").
    pub admin_password: String,

    /// Require an admin session token on catalog mutations (default: false).
    pub require_admin_session: bool,

    /// API key for the chat-completion endpoint (optional).
    pub groq_api_key: Option<String>,

    /// Chat-completion endpoint URL.
    pub groq_api_url: String,

    /// Chat model name.
    pub ai_model: String,

    /// Timeout for one assistant call, in seconds.
    pub ai_timeout_seconds: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum JSON request body size in bytes.
    pub max_body_bytes: usize,

    /// Maximum upload body size in bytes.
    pub max_upload_bytes: usize,

    /// Timeout for JSON API requests, in seconds. Uploads have their own deadline.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            require_admin_session: env_parse("REQUIRE_ADMIN_SESSION")
                .unwrap_or(defaults.require_admin_session),
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            groq_api_url: std::env::var("GROQ_API_URL").unwrap_or(defaults.groq_api_url),
            ai_model: std::env::var("AI_MODEL").unwrap_or(defaults.ai_model),
            ai_timeout_seconds: env_parse("AI_TIMEOUT_SECONDS")
                .unwrap_or(defaults.ai_timeout_seconds),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

/// Read and parse an environment variable, ignoring bad values.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = %name, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5045".into(),
            database_path: "medical_training.db".into(),
            upload_dir: "uploads".into(),
            admin_password: "q1".into(),
            require_admin_session: false,
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.into(),
            ai_model: DEFAULT_AI_MODEL.into(),
            ai_timeout_seconds: 30,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,          // 1MB
            max_upload_bytes: 500 * 1024 * 1024, // 500MB
            request_timeout_seconds: 60,
        }
    }
}
