//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{code}`   - Short link redirect
//! - `GET  /health`     - Health check
//! - `/api/*`           - Admin REST API
//!
//! # Middleware
//!
//! - **Panic recovery** - A panicking handler yields a 500 error envelope
//! - **Request budget** - Requests running past the budget are answered with 504
//! - **CORS** - Configured origins, exposing `Content-Range` and `Location`
//! - **Request id** - `X-Request-ID` kept or generated, and echoed back
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{budget, cors, recovery, request_id, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Edge settings for [`app_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_budget: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_budget: Duration::from_secs(2),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/r/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(recovery::layer())
        .layer(middleware::from_fn_with_state(
            options.request_budget,
            budget::layer,
        ))
        .layer(cors::layer(&options.cors_allowed_origins))
        .layer(request_id::propagate_layer())
        .layer(tracing::layer())
        .layer(request_id::set_layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
