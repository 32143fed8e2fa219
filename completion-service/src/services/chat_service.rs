//! OpenAI-compatible chat-completions client.
//!
//! Minimal, non-streaming client used against Groq's OpenAI-compatible REST
//! API. The endpoint is derived from `CompletionConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! One invocation makes exactly one outbound call, bounded by a wall-clock
//! timeout (`tokio::time::timeout` around send + decode). There is no retry
//! and no backoff; the caller decides what to do with a failure.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    CompletionApi,
    config::completion_config::CompletionConfig,
    error_handler::{CompletionError, ConfigError, make_snippet},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Thin client for an OpenAI-compatible chat-completions API.
///
/// Constructed from a complete [`CompletionConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with default headers; the per-call budget
/// is enforced outside the client so an elapsed deadline is reported as
/// [`CompletionError::Timeout`] rather than a generic transport error.
#[derive(Debug)]
pub struct ChatCompletionService {
    client: reqwest::Client,
    cfg: CompletionConfig,
    url_chat: String,
    timeout: Duration,
}

impl ChatCompletionService {
    /// Creates a new [`ChatCompletionService`] from the given config.
    ///
    /// # Errors
    /// - [`CompletionError::Config`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`CompletionError::Config`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`CompletionError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey)?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                CompletionError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "ChatCompletionService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            timeout,
        })
    }

    /// Performs a non-streaming chat completion request.
    ///
    /// The message array is always `[system, user]`. Mapped options from
    /// config: `model`, `temperature`, `top_p`, `max_tokens`.
    ///
    /// A reply whose first choice carries no content resolves to an empty
    /// string; deciding whether that is acceptable is left to the caller.
    ///
    /// # Errors
    /// - [`CompletionError::Timeout`] when the wall-clock budget elapses
    /// - [`CompletionError::HttpStatus`] for non-2xx responses
    /// - [`CompletionError::HttpTransport`] for client/network failures
    /// - [`CompletionError::Decode`] if the JSON cannot be parsed
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, system, user);

        debug!(
            model = %self.cfg.model,
            prompt_len = user.len(),
            "POST {}", self.url_chat
        );

        let content = match tokio::time::timeout(self.timeout, self.send(&body)).await {
            Ok(result) => result?,
            Err(_) => {
                error!(
                    model = %self.cfg.model,
                    endpoint = %self.cfg.endpoint,
                    timeout_secs = self.timeout.as_secs(),
                    "chat completion exceeded wall-clock budget"
                );
                return Err(CompletionError::Timeout(self.timeout));
            }
        };

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            content_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    async fn send(&self, body: &ChatCompletionRequest<'_>) -> Result<String, CompletionError> {
        let resp = self.client.post(&self.url_chat).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                "chat completions returned non-success status"
            );

            return Err(CompletionError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            error!(error = %e, model = %self.cfg.model, "failed to decode chat completions response");
            CompletionError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        // Absent content is an empty completion, not a protocol error.
        Ok(out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl CompletionApi for ChatCompletionService {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        ChatCompletionService::complete(self, system, user).await
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a CompletionConfig, system: &'a str, user: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str, timeout_secs: u64) -> CompletionConfig {
        CompletionConfig {
            model: "llama-3.1-8b-instant".into(),
            endpoint: endpoint.into(),
            api_key: Some("test-key".into()),
            max_tokens: Some(200),
            temperature: Some(0.2),
            top_p: Some(0.9),
            timeout_secs: Some(timeout_secs),
        }
    }

    fn completion_body(content: serde_json::Value) -> serde_json::Value {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "44th Miss World competition winner\nwinner birth year".into(),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 5)).unwrap();
        let text = svc
            .complete("reformulate", "In what year was the winner born?")
            .await
            .unwrap();
        assert_eq!(
            text,
            "44th Miss World competition winner\nwinner birth year"
        );
    }

    #[tokio::test]
    async fn null_content_is_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(serde_json::Value::Null)),
            )
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 5)).unwrap();
        let text = svc.complete("sys", "user").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn empty_choices_is_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 5)).unwrap();
        let text = svc.complete("sys", "user").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 5)).unwrap();
        let err = svc.complete("sys", "user").await.unwrap_err();
        match err {
            CompletionError::HttpStatus { status, snippet, .. } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(snippet, "rate limited");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late".into()))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 1)).unwrap();
        let err = svc.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, CompletionError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let svc = ChatCompletionService::new(test_config(&server.uri(), 5)).unwrap();
        let err = svc.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, CompletionError::Decode(_)));
    }

    #[test]
    fn constructor_rejects_missing_api_key() {
        let mut cfg = test_config("https://api.groq.com/openai", 5);
        cfg.api_key = None;
        let err = ChatCompletionService::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Config(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn constructor_rejects_bad_endpoint_scheme() {
        let mut cfg = test_config("ftp://example.com", 5);
        cfg.api_key = Some("k".into());
        let err = ChatCompletionService::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Config(ConfigError::InvalidEndpoint(_))
        ));
    }
}
