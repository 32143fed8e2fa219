//! Remote completion capability behind a single trait.
//!
//! The crate owns everything needed to talk to an OpenAI-compatible
//! chat-completions endpoint (the configured provider is Groq):
//!
//! - [`config`] — the [`CompletionConfig`] struct and env-driven constructors
//! - [`services`] — the [`ChatCompletionService`] HTTP client
//! - [`error_handler`] — the unified [`CompletionError`] type
//! - [`telemetry`] — a crate-scoped `tracing` formatting layer
//!
//! Callers should depend on the [`CompletionApi`] trait, not on the concrete
//! client, so a different provider (or a test fake) can be substituted without
//! touching the calling code.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::completion_config::CompletionConfig;
pub use error_handler::{CompletionError, ConfigError};
pub use services::chat_service::ChatCompletionService;

use async_trait::async_trait;

/// Provider-agnostic completion capability.
///
/// Given a system instruction and a user message, returns the raw text of the
/// model's reply. A reply with no content is `Ok` with an empty string; only
/// transport, protocol, and timeout failures are errors.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}
