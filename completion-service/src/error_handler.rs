//! Unified error handling for `completion-service`.
//!
//! One top-level [`CompletionError`] for the whole crate, with startup-time
//! configuration problems grouped in [`ConfigError`]. Small helpers for
//! reading environment variables return the unified [`Result<T>`] alias.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Top-level error for the `completion-service` crate.
///
/// `Config` only ever happens at startup; the remaining variants describe a
/// single failed invocation. None of them is retried by this crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invocation exceeded the configured wall-clock budget.
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like limits or timeouts).
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// The endpoint is empty or does not start with http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// API key is required for the configured provider but absent.
    #[error("API key must be set for the configured provider")]
    MissingApiKey,
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            CompletionError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            CompletionError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Maximum length of an upstream body snippet kept in errors/logs.
const SNIPPET_MAX: usize = 300;

/// Compacts an upstream response body into a short, single-line snippet that
/// is safe to log and carry inside an error.
pub fn make_snippet(body: &str) -> String {
    let mut s: String = body
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if s.len() > SNIPPET_MAX {
        let mut end = SNIPPET_MAX;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
        s.push('…');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_snippet_collapses_whitespace() {
        assert_eq!(make_snippet("a  b\n\t c"), "a b c");
    }

    #[test]
    fn make_snippet_truncates_long_bodies() {
        let long = "x".repeat(1000);
        let snippet = make_snippet(&long);
        assert!(snippet.chars().count() <= SNIPPET_MAX + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn missing_var_message_names_the_variable() {
        let err = must_env("DEFINITELY_NOT_SET_ANYWHERE_12345").unwrap_err();
        assert!(err.to_string().contains("DEFINITELY_NOT_SET_ANYWHERE_12345"));
    }
}
