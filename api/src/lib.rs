//! HTTP surface for the query-reformulation service.
//!
//! One route: `POST /reformulate`. The shared [`core::app_state::AppState`]
//! carries the completion capability; all per-request logic lives in the
//! `reformulator` crate.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{Router, routing::post};
use tokio::signal;
use tracing::info;

use crate::{core::app_state::AppState, routes::reformulate::reformulate_route::reformulate_query};

/// Binds the listener and serves until Ctrl+C.
///
/// Reads `API_ADDRESS` (default `0.0.0.0:8080`) and builds the shared state
/// from the environment; a missing `GROQ_API_KEY` fails here, at startup,
/// never per request.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/reformulate", post(reformulate_query))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(addr = %host_url, "reformulation service listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
