//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::api::dto::list_query::{self, ListParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists links.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Query Parameters
///
/// - `range` (optional): `[start,end]`, inclusive, at most 1000 rows
/// - `sort` (optional): `["field","ASC|DESC"]` where field is `id`,
///   `short_name` or `original_url` (default `["id","ASC"]`)
///
/// A `Range: links=start-end` (or `links=[start,count]`) header may be used
/// instead of `range`.
/// Ranged responses carry `Content-Range: links start-end/total`.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed range or sort.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let query = params.into_query(&headers, list_query::LINKS)?;
    let page = state.link_service.list_links(&query).await?;

    let body: Vec<LinkResponse> = page
        .items
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();

    let Some(range) = query.range else {
        return Ok(Json(body).into_response());
    };

    let content_range =
        list_query::content_range_header(list_query::LINKS, range, body.len(), page.total)?;

    Ok(([(header::CONTENT_RANGE, content_range)], Json(body)).into_response())
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/landing",
///   "short_name": "promo2024"   // optional, generated when absent or empty
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or short name.
/// Returns 409 Conflict if the short name is taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            &payload.original_url,
            payload.short_name.as_deref().unwrap_or_default(),
        )
        .await?;

    let location = format!("/api/links/{}", link.id);
    let body = LinkResponse::from_link(link, &state.base_url);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response())
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Rewrites a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// An empty or missing `short_name` assigns a newly generated one.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 409 Conflict if the new short name is taken.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    if let Some(body_id) = payload.id
        && body_id != id
    {
        return Err(AppError::bad_request(
            "id mismatch",
            json!({ "path_id": id, "body_id": body_id }),
        ));
    }

    let link = state
        .link_service
        .update_link(
            id,
            &payload.original_url,
            payload.short_name.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Deletes a link. Its visit records are kept.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request("invalid id", json!({ "id": raw })))
}
