//! POST /reformulate — turns one question into 1–5 search queries.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde_json::Value;
use tracing::{debug, error};

use reformulator::{reformulate, validate};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::reformulate::reformulate_request::ReformulateResponse,
};

/// Handler: POST /reformulate
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/reformulate \
///   -H 'content-type: application/json' \
///   -d '{"query":"In what year was the winner of the 44th edition of the Miss World competition born?"}'
/// ```
pub async fn reformulate_query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ReformulateResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload.map_err(|err| {
        error!(request_id = %request_id, error = %err, "reformulate: body rejected");
        AppError::from(err)
    })?;

    let request = validate(&body).map_err(|err| {
        error!(request_id = %request_id, error = %err, "reformulate: validation failed");
        AppError::from(err)
    })?;

    debug!(
        request_id = %request_id,
        query_len = request.query.len(),
        "reformulate: start"
    );

    let queries = reformulate(state.completion.as_ref(), &request)
        .await
        .map_err(|err| {
            error!(
                request_id = %request_id,
                query_len = request.query.len(),
                error = %err,
                "reformulate: pipeline failed"
            );
            AppError::from(err)
        })?;

    debug!(
        request_id = %request_id,
        count = queries.len(),
        "reformulate: success"
    );

    Ok(Json(ReformulateResponse {
        reformulated_queries: queries,
    }))
}
