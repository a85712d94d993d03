// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the feed.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use weft_core::{OrderSupply, WeftError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct FeedState {
    /// The order supplier behind the data endpoints.
    pub supply: Arc<dyn OrderSupply>,
    /// Upper clamp for `/api/get_data/{amount}` requests.
    pub max_amount: u32,
}

/// Feed server configuration (mirrors FeedConfig from weft-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the feed router.
///
/// CORS is fully permissive; the feed is an open demo endpoint.
pub fn router(state: FeedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/get_data", get(handlers::get_data))
        .route("/api/get_data/{amount}", get(handlers::get_data_amount))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the feed HTTP server.
///
/// Binds to the configured host:port and serves until ctrl-c:
/// - GET / (liveness message)
/// - GET /api/get_data (source-chosen batch size)
/// - GET /api/get_data/{amount} (clamped batch size)
pub async fn start_server(config: &ServerConfig, state: FeedState) -> Result<(), WeftError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WeftError::Feed {
            message: format!("failed to bind feed to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Feed server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WeftError::Feed {
            message: format!("feed server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received, draining feed server"),
        Err(e) => {
            // No handler means no graceful path; keep serving until killed.
            tracing::error!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
