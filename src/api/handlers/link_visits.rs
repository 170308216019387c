//! Handler for visit listing.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::link_visit::LinkVisitResponse;
use crate::api::dto::list_query::{self, ListParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded visits.
///
/// # Endpoint
///
/// `GET /api/link_visits`
///
/// Same `range` and `sort` parameters as `GET /api/links`. Sortable fields are
/// `id`, `link_id`, `ip`, `status`, `referer` and `created_at`; the default
/// is newest first.
pub async fn list_link_visits_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let query = params.into_query(&headers, list_query::LINK_VISITS)?;
    let page = state.link_service.list_link_visits(&query).await?;

    let body: Vec<LinkVisitResponse> = page.items.into_iter().map(Into::into).collect();

    let Some(range) = query.range else {
        return Ok(Json(body).into_response());
    };

    let content_range =
        list_query::content_range_header(list_query::LINK_VISITS, range, body.len(), page.total)?;

    Ok(([(header::CONTENT_RANGE, content_range)], Json(body)).into_response())
}
