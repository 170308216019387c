//! List query decoding and `Content-Range` rendering.
//!
//! Admin clients send list parameters as JSON arrays in the query string:
//!
//! - `range=[0,9]` - inclusive bounds, first ten rows
//! - `sort=["short_name","DESC"]`
//!
//! A `range` value that is not a JSON array, and the `Range` header used when
//! the query has no `range`, take the header forms:
//!
//! - `links=0-9` or `0-9` - inclusive bounds
//! - `links=[0,10]` or `[0,10]` - start and count

use axum::http::{HeaderMap, HeaderValue, header};
use serde::Deserialize;

use crate::domain::query::{ListQuery, Range, RawSort};
use crate::error::AppError;

/// A listable resource: its range unit and the legacy sort names it accepts.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub name: &'static str,
    aliases: &'static [(&'static str, &'static str)],
}

pub const LINKS: Resource = Resource {
    name: "links",
    aliases: &[("short_url", "short_name")],
};

pub const LINK_VISITS: Resource = Resource {
    name: "link_visits",
    aliases: &[("reffer", "referer")],
};

impl Resource {
    fn resolve_alias<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(field.trim()))
            .map_or(field, |(_, canonical)| *canonical)
    }
}

/// Raw list parameters from the query string.
///
/// `filter` is accepted for client compatibility and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub range: Option<String>,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

impl ListParams {
    /// Decodes the parameters plus an optional `Range` header into a [`ListQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] or [`AppError::InvalidSort`] when the
    /// respective parameter cannot be decoded.
    pub fn into_query(self, headers: &HeaderMap, resource: Resource) -> Result<ListQuery, AppError> {
        let range = match self.range.as_deref().map(str::trim) {
            Some(raw) if raw.starts_with('[') => Some(parse_range_param(raw)?),
            Some(raw) if !raw.is_empty() => Some(parse_range_header(raw, resource)?),
            _ => match headers.get(header::RANGE) {
                Some(value) => {
                    let raw = value.to_str().map_err(|_| AppError::InvalidRange)?;
                    Some(parse_range_header(raw, resource)?)
                }
                None => None,
            },
        };

        let sort = match self.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_sort_param(raw, resource)?,
            _ => RawSort::default(),
        };

        Ok(ListQuery { sort, range })
    }
}

/// Parses `[start,end]` with inclusive bounds.
fn parse_range_param(raw: &str) -> Result<Range, AppError> {
    let bounds: Vec<i64> = serde_json::from_str(raw).map_err(|_| AppError::InvalidRange)?;

    match bounds.as_slice() {
        [start, end] => Range::inclusive(*start, *end),
        _ => Err(AppError::InvalidRange),
    }
}

/// Parses `links=0-9`, `links=[0,10]`, or either form without the unit.
fn parse_range_header(raw: &str, resource: Resource) -> Result<Range, AppError> {
    let raw = raw.trim();
    let bounds = match raw.split_once('=') {
        Some((unit, bounds)) if unit.trim() == resource.name => bounds.trim(),
        Some(_) => return Err(AppError::InvalidRange),
        None => raw,
    };

    if let Some(inner) = bounds.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        let (start, count) = split_pair(inner, ',')?;
        return Range::new(start, count);
    }

    let (start, end) = split_pair(bounds, '-')?;
    Range::inclusive(start, end)
}

fn split_pair(raw: &str, sep: char) -> Result<(i64, i64), AppError> {
    let (left, right) = raw.split_once(sep).ok_or(AppError::InvalidRange)?;
    let left = left.trim().parse().map_err(|_| AppError::InvalidRange)?;
    let right = right.trim().parse().map_err(|_| AppError::InvalidRange)?;
    Ok((left, right))
}

/// Parses `["field","ORDER"]`, mapping legacy field names.
fn parse_sort_param(raw: &str, resource: Resource) -> Result<RawSort, AppError> {
    let parts: Vec<String> = serde_json::from_str(raw).map_err(|_| AppError::InvalidSort)?;

    match parts.as_slice() {
        [field, order] => Ok(RawSort::new(resource.resolve_alias(field), order.as_str())),
        _ => Err(AppError::InvalidSort),
    }
}

/// Renders `Content-Range` for a ranged response.
///
/// `links 0-4/11` for a non-empty page, `links */11` when nothing was returned.
pub fn content_range(resource: Resource, range: Range, returned: usize, total: i64) -> String {
    if returned == 0 {
        return format!("{} */{}", resource.name, total);
    }

    let last = range.start() + returned as i64 - 1;
    format!("{} {}-{}/{}", resource.name, range.start(), last, total)
}

/// Header value form of [`content_range`].
pub fn content_range_header(
    resource: Resource,
    range: Range,
    returned: usize,
    total: i64,
) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&content_range(resource, range, returned, total)).map_err(|e| {
        AppError::internal(
            "invalid content-range header",
            serde_json::json!({ "reason": e.to_string() }),
        )
    })
}
