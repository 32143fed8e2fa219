use std::sync::Arc;

use completion_service::{
    ChatCompletionService, CompletionApi, CompletionError, config::default_config::config_groq,
};
use tracing::info;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Completion capability used by the reformulation pipeline. Held as a
    /// trait object so tests and alternative providers can slot in.
    pub completion: Arc<dyn CompletionApi>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// Fallible on purpose: a missing or invalid completion config must abort
    /// boot instead of surfacing on the first request.
    pub fn from_env() -> Result<Self, CompletionError> {
        let cfg = config_groq()?;
        info!(config = ?cfg, "completion config loaded");

        let service = ChatCompletionService::new(cfg)?;

        Ok(Self {
            completion: Arc::new(service),
        })
    }
}
