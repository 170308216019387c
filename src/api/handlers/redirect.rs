//! Handler for short link redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::domain::entities::VisitMeta;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Redirects a short name to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Request Flow
///
/// 1. Validate and resolve the short name
/// 2. Record a visit with client IP, `User-Agent` and `Referer`
/// 3. Return 302 Found with `Location`
///
/// A failed visit write is logged and does not affect the redirect.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed short name.
/// Returns 404 Not Found if the short name doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let meta = VisitMeta {
        ip: extract_client_ip(&headers, Some(addr), state.behind_proxy),
        user_agent: header_text(&headers, header::USER_AGENT),
        referer: header_text(&headers, header::REFERER),
    };

    let target = state.link_service.redirect(&code, meta).await?;

    Ok((target.status, [(header::LOCATION, target.url)]).into_response())
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
