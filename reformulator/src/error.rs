//! Typed error for the reformulator crate.

use completion_service::CompletionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReformulateError {
    /// The request body was malformed, or the query was missing/empty.
    #[error("invalid request: {0}")]
    Validation(&'static str),

    /// The completion call exceeded its wall-clock budget.
    #[error("completion timed out after {0:?}")]
    UpstreamTimeout(std::time::Duration),

    /// Any other completion failure (transport, status, decode).
    #[error("completion failed: {0}")]
    Upstream(#[source] CompletionError),
}

impl From<CompletionError> for ReformulateError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Timeout(budget) => ReformulateError::UpstreamTimeout(budget),
            other => ReformulateError::Upstream(other),
        }
    }
}
