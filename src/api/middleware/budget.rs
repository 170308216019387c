//! Per-request time budget.
//!
//! The handler future, including storage calls and the visit write, is
//! dropped once the budget runs out and the caller gets 504.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;

use crate::error::AppError;

/// Runs the rest of the stack under `budget`.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/links", get(list_links_handler))
///     .layer(middleware::from_fn_with_state(Duration::from_secs(2), budget::layer));
/// ```
pub async fn layer(State(budget): State<Duration>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match tokio::time::timeout(budget, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                %method,
                path = %path,
                budget_ms = budget.as_millis() as u64,
                "Request exceeded its time budget"
            );
            AppError::DeadlineExceeded.into_response()
        }
    }
}
