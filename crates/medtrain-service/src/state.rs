//! Application state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use medtrain_store::Store;

use crate::assistant::AssistantClient;
use crate::auth::SessionGate;
use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Admin session gate.
    pub sessions: Arc<SessionGate>,

    /// Chat-completion client (optional).
    pub assistant: Option<Arc<AssistantClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let assistant = config.groq_api_key.as_ref().and_then(|key| {
            match AssistantClient::new(
                &config.groq_api_url,
                key,
                &config.ai_model,
                Duration::from_secs(config.ai_timeout_seconds),
            ) {
                Ok(client) => {
                    tracing::info!(model = %config.ai_model, "AI assistant enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create AI assistant client");
                    None
                }
            }
        });

        if assistant.is_none() {
            tracing::warn!("GROQ_API_KEY not configured - AI chat will be unavailable");
        }

        if config.require_admin_session {
            tracing::info!("Admin session required for catalog changes");
        }

        let sessions = Arc::new(SessionGate::new(config.admin_password.clone()));

        Self {
            store,
            config,
            sessions,
            assistant,
        }
    }

    /// Root directory for uploaded media.
    #[must_use]
    pub fn upload_root(&self) -> PathBuf {
        PathBuf::from(&self.config.upload_dir)
    }
}
