use std::fmt;

/// Configuration for a completion-model invocation.
///
/// Built once at startup (see [`crate::config::default_config`]) and injected
/// into the client; nothing reads the environment at call time.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"llama-3.1-8b-instant"`).
/// - `endpoint`: Base URL of the OpenAI-compatible API.
/// - `api_key`: API key for providers that require authentication.
/// - `max_tokens`: Cap on generated output length.
/// - `temperature`: Sampling temperature (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Wall-clock budget for one invocation, in seconds.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Model identifier string.
    pub model: String,

    /// Base URL of the OpenAI-compatible API (without the `/v1/...` path).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

// Manual Debug so the API key never reaches logs.
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = CompletionConfig {
            model: "llama-3.1-8b-instant".into(),
            endpoint: "https://api.groq.com/openai".into(),
            api_key: Some("gsk_super_secret".into()),
            max_tokens: Some(200),
            temperature: Some(0.2),
            top_p: Some(0.9),
            timeout_secs: Some(5),
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("gsk_super_secret"));
    }
}
