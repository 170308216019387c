//! `X-Request-ID` handling.
//!
//! An incoming id is kept as-is, a missing one is filled with a UUID v4.
//! Either way the id lands in the request extensions as
//! [`tower_http::request_id::RequestId`] and is echoed on the response.

use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Sets `X-Request-ID` on the request when the client did not send one.
///
/// Must wrap [`propagate_layer`] so the propagated value is never empty.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/r/{code}", get(redirect_handler))
///     .layer(request_id::propagate_layer())
///     .layer(tracing::layer())
///     .layer(request_id::set_layer());
/// ```
pub fn set_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Copies the request's `X-Request-ID` onto the response.
pub fn propagate_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}
