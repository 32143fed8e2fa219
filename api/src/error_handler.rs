use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use completion_service::CompletionError;
use reformulator::ReformulateError;
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] CompletionError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request pipeline ---
    #[error(transparent)]
    Reformulate(#[from] ReformulateError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Reformulate(ReformulateError::Validation(_)) => StatusCode::BAD_REQUEST,

            // Timeouts, upstream failures, and startup-only variants all map
            // to a generic 500.
            AppError::Reformulate(_)
            | AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed, non-leaking message shown to callers. Internal detail stays in
    /// the logs only.
    fn client_message(&self) -> &'static str {
        match self {
            AppError::Reformulate(ReformulateError::Validation(_)) => {
                "Query parameter is required"
            }
            _ => "Failed to reformulate query",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Undeserializable bodies collapse into the same fixed validation message as
/// a missing field; the rejection detail is logged at the handler.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(_err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Reformulate(ReformulateError::Validation(
            "body must be a JSON object with a `query` field",
        ))
    }
}
