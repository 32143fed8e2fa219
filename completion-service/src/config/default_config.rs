//! Default completion config loaded strictly from environment variables.
//!
//! The configured provider is **Groq**, which exposes an OpenAI-compatible
//! chat-completions API. Sampling parameters are fixed process-wide: a low
//! temperature keeps the output deterministic-leaning while still allowing
//! minor phrasing variation, and a tight `top_p` keeps it on-topic.
//!
//! # Environment variables
//!
//! - `GROQ_API_KEY`      = API key (mandatory; absence aborts startup)
//! - `GROQ_URL`          = API base URL (optional)
//! - `GROQ_MODEL`        = model identifier (optional)
//! - `LLM_MAX_TOKENS`    = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS`  = optional per-call timeout in seconds (u64)

use crate::{
    config::completion_config::CompletionConfig,
    error_handler::{CompletionError, env_opt_u32, env_opt_u64, must_env},
};

/// Default API base. The `/v1/chat/completions` path is appended by the client.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai";

/// Default model: a fast, low-latency instruction-tuned model.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const DEFAULT_MAX_TOKENS: u32 = 200;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Constructs the process-wide Groq completion config.
///
/// # Env
/// - `GROQ_API_KEY` (required)
/// - `GROQ_URL`, `GROQ_MODEL`, `LLM_MAX_TOKENS`, `LLM_TIMEOUT_SECS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `top_p = Some(0.9)`
/// - `max_tokens = Some(200)`
/// - `timeout_secs = Some(5)`
///
/// # Errors
/// Returns [`CompletionError::Config`] when the key is missing or a numeric
/// override fails to parse.
pub fn config_groq() -> Result<CompletionConfig, CompletionError> {
    let api_key = must_env("GROQ_API_KEY")?;
    let endpoint = std::env::var("GROQ_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let model = std::env::var("GROQ_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(DEFAULT_MAX_TOKENS));
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(DEFAULT_TIMEOUT_SECS));

    Ok(CompletionConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: Some(0.9),
        timeout_secs,
    })
}
