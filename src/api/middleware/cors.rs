//! CORS policy for browser-based admin clients.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Builds the CORS layer from configured origins.
///
/// `*` allows any origin. An empty list allows none. `Content-Range`,
/// `Location` and `X-Request-ID` are exposed to browser clients.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::RANGE,
            REQUEST_ID,
        ])
        .expose_headers([header::CONTENT_RANGE, header::LOCATION, REQUEST_ID]);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    cors.allow_origin(origins)
}
