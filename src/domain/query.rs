//! Sort and range model shared by the API edge and the storage adapter.
//!
//! The edge decodes a [`RawSort`] and an optional [`Range`] from the request.
//! The service normalizes the sort against a per-entity allow-list with
//! [`normalize_and_validate_sort`] before anything reaches storage.

use crate::error::AppError;

/// Largest number of rows a single ranged request may ask for.
pub const MAX_RANGE_COUNT: i64 = 1000;

/// Orderable columns across links and visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    ShortName,
    OriginalUrl,
    LinkId,
    Ip,
    Status,
    Referer,
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ShortName => "short_name",
            Self::OriginalUrl => "original_url",
            Self::LinkId => "link_id",
            Self::Ip => "ip",
            Self::Status => "status",
            Self::Referer => "referer",
            Self::CreatedAt => "created_at",
        }
    }

    /// Parses a lowercase field name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "short_name" => Some(Self::ShortName),
            "original_url" => Some(Self::OriginalUrl),
            "link_id" => Some(Self::LinkId),
            "ip" => Some(Self::Ip),
            "status" => Some(Self::Status),
            "referer" => Some(Self::Referer),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A normalized sort instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

pub const DEFAULT_LINKS_SORT: Sort = Sort::new(SortField::Id, SortOrder::Asc);
pub const DEFAULT_LINK_VISITS_SORT: Sort = Sort::new(SortField::CreatedAt, SortOrder::Desc);

pub const LINKS_SORT_FIELDS: &[SortField] =
    &[SortField::Id, SortField::ShortName, SortField::OriginalUrl];

pub const LINK_VISITS_SORT_FIELDS: &[SortField] = &[
    SortField::Id,
    SortField::LinkId,
    SortField::Ip,
    SortField::Status,
    SortField::Referer,
    SortField::CreatedAt,
];

/// Sort exactly as the caller sent it. Both parts empty means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSort {
    pub field: String,
    pub order: String,
}

impl RawSort {
    pub fn new(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }
}

/// Normalizes `raw` against `allowed`, falling back to `default` when `raw` is empty.
///
/// The order is trimmed and uppercased, the field trimmed and lowercased.
///
/// # Errors
///
/// Returns [`AppError::InvalidSort`] if the order is not `ASC`/`DESC`, the field
/// is empty or unknown, or the field is not in `allowed`. An empty allow-list
/// rejects every explicit sort.
pub fn normalize_and_validate_sort(
    raw: &RawSort,
    default: Sort,
    allowed: &[SortField],
) -> Result<Sort, AppError> {
    let field = raw.field.trim().to_ascii_lowercase();
    let order = raw.order.trim().to_ascii_uppercase();

    if field.is_empty() && order.is_empty() {
        return Ok(default);
    }

    let order = match order.as_str() {
        "ASC" => SortOrder::Asc,
        "DESC" => SortOrder::Desc,
        _ => return Err(AppError::InvalidSort),
    };

    let field = SortField::parse(&field).ok_or(AppError::InvalidSort)?;
    if !allowed.contains(&field) {
        return Err(AppError::InvalidSort);
    }

    Ok(Sort { field, order })
}

/// A validated window: `count` rows starting at zero-based `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i64,
    count: i64,
}

impl Range {
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] if `start < 0` or `count` is outside
    /// `1..=MAX_RANGE_COUNT`.
    pub fn new(start: i64, count: i64) -> Result<Self, AppError> {
        if start < 0 || !(1..=MAX_RANGE_COUNT).contains(&count) {
            return Err(AppError::InvalidRange);
        }
        Ok(Self { start, count })
    }

    /// Builds a range from inclusive bounds `[start, end]`.
    pub fn inclusive(start: i64, end: i64) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::InvalidRange);
        }
        let count = end
            .checked_sub(start)
            .and_then(|d| d.checked_add(1))
            .ok_or(AppError::InvalidRange)?;
        Self::new(start, count)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

/// List request handed to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: RawSort,
    pub range: Option<Range>,
}

/// A list result. `total` is `-1` when the request was not ranged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sort_returns_default() {
        let sort =
            normalize_and_validate_sort(&RawSort::default(), DEFAULT_LINKS_SORT, LINKS_SORT_FIELDS)
                .unwrap();
        assert_eq!(sort, DEFAULT_LINKS_SORT);

        let sort = normalize_and_validate_sort(
            &RawSort::new("  ", " "),
            DEFAULT_LINK_VISITS_SORT,
            LINK_VISITS_SORT_FIELDS,
        )
        .unwrap();
        assert_eq!(sort, DEFAULT_LINK_VISITS_SORT);
    }

    #[test]
    fn test_sort_is_normalized() {
        let sort = normalize_and_validate_sort(
            &RawSort::new(" Short_Name ", "desc"),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        )
        .unwrap();

        assert_eq!(sort.field, SortField::ShortName);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_invalid_order_rejected() {
        let result = normalize_and_validate_sort(
            &RawSort::new("id", "sideways"),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        );
        assert!(matches!(result, Err(AppError::InvalidSort)));
    }

    #[test]
    fn test_missing_order_rejected() {
        let result = normalize_and_validate_sort(
            &RawSort::new("id", ""),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        );
        assert!(matches!(result, Err(AppError::InvalidSort)));
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = normalize_and_validate_sort(
            &RawSort::new("", "ASC"),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        );
        assert!(matches!(result, Err(AppError::InvalidSort)));
    }

    #[test]
    fn test_field_outside_allow_list_rejected() {
        let result = normalize_and_validate_sort(
            &RawSort::new("ip", "ASC"),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        );
        assert!(matches!(result, Err(AppError::InvalidSort)));

        let result = normalize_and_validate_sort(
            &RawSort::new("password", "ASC"),
            DEFAULT_LINKS_SORT,
            LINKS_SORT_FIELDS,
        );
        assert!(matches!(result, Err(AppError::InvalidSort)));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let result =
            normalize_and_validate_sort(&RawSort::new("id", "ASC"), DEFAULT_LINKS_SORT, &[]);
        assert!(matches!(result, Err(AppError::InvalidSort)));
    }

    #[test]
    fn test_visit_fields_allowed_for_visits() {
        for field in ["id", "link_id", "ip", "status", "referer", "created_at"] {
            let sort = normalize_and_validate_sort(
                &RawSort::new(field, "ASC"),
                DEFAULT_LINK_VISITS_SORT,
                LINK_VISITS_SORT_FIELDS,
            );
            assert!(sort.is_ok(), "field '{}' should be allowed", field);
        }
    }

    #[test]
    fn test_range_bounds() {
        assert!(Range::new(0, 1).is_ok());
        assert!(Range::new(0, MAX_RANGE_COUNT).is_ok());
        assert!(matches!(Range::new(-1, 5), Err(AppError::InvalidRange)));
        assert!(matches!(Range::new(0, 0), Err(AppError::InvalidRange)));
        assert!(Range::new(0, MAX_RANGE_COUNT + 1).is_err());
    }

    #[test]
    fn test_inclusive_range() {
        let range = Range::inclusive(0, 4).unwrap();
        assert_eq!(range.start(), 0);
        assert_eq!(range.count(), 5);

        let range = Range::inclusive(5, 10).unwrap();
        assert_eq!(range.start(), 5);
        assert_eq!(range.count(), 6);

        assert!(Range::inclusive(4, 3).is_err());
        assert!(Range::inclusive(0, 1000).is_err());
        assert!(Range::inclusive(i64::MIN, i64::MAX).is_err());
    }
}
