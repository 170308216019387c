//! Handler for health check endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{DatabaseCheck, HealthResponse};
use crate::state::AppState;

/// Reports whether storage is reachable.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Link and visit counts could be read
/// - **503 Service Unavailable**: Storage failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": { "ok": true, "links": 11, "visits": 42 }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let database = match state.link_service.stats().await {
        Ok(stats) => DatabaseCheck::from_stats(stats),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            DatabaseCheck::failed(e.to_string())
        }
    };

    let (code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    };

    (code, Json(body)).into_response()
}
