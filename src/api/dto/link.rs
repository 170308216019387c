//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Surface check for short names; the service applies the full rule after trimming.
static SHORT_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z0-9]*\s*$").unwrap());

/// Request to create a link.
///
/// An absent or empty `short_name` asks the service to generate one.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "original_url is required"))]
    pub original_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 64))]
    #[validate(regex(path = "*SHORT_NAME_CHARS"))]
    pub short_name: Option<String>,
}

/// Request to rewrite a link.
///
/// Admin clients send the whole record back, so read-only fields such as
/// `short_url` and `created_at` are accepted and ignored. A body `id` must
/// match the path.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 2048, message = "original_url is required"))]
    pub original_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 64))]
    #[validate(regex(path = "*SHORT_NAME_CHARS"))]
    pub short_name: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: link.short_url(base_url),
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            created_at: link.created_at,
        }
    }
}
