//! Panic recovery.
//!
//! A handler panic is turned into a 500 with the usual error envelope
//! instead of dropping the connection.

use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Catches panics from the wrapped service.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/links", get(list_links_handler))
///     .layer(recovery::layer());
/// ```
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %message, "Handler panicked");

    AppError::internal("internal server error", json!({})).into_response()
}
