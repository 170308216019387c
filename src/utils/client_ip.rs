//! Client address extraction for visit logging.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Proxy headers consulted in priority order when running behind a proxy.
const PROXY_HEADERS: &[&str] = &["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Returns the caller IP as text.
///
/// With `behind_proxy` set, the first non-empty proxy header wins; for
/// `X-Forwarded-For` only the left-most hop is used. Otherwise, and as a
/// fallback, the socket peer address is used. Returns an empty string when
/// nothing is known.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(extract_client_ip(&headers, None, true), "203.0.113.9");
/// ```
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> String {
    if behind_proxy {
        for name in PROXY_HEADERS {
            let value = headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());

            if let Some(ip) = value {
                return ip.to_string();
            }
        }
    }

    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}
