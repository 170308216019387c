//! `ORDER BY` rendering for list queries.
//!
//! Every non-key field is followed by `id` in the same direction so that
//! pagination over equal values stays deterministic. Field names come from a
//! closed enum, never from request text.

use crate::domain::query::{LINK_VISITS_SORT_FIELDS, LINKS_SORT_FIELDS, Sort, SortField};
use crate::error::AppError;

/// Tables that support ordered listing, with the alias used in their queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Links,
    LinkVisits,
}

impl Table {
    pub fn alias(&self) -> &'static str {
        match self {
            Self::Links => "l",
            Self::LinkVisits => "v",
        }
    }

    fn orderable(&self) -> &'static [SortField] {
        match self {
            Self::Links => LINKS_SORT_FIELDS,
            Self::LinkVisits => LINK_VISITS_SORT_FIELDS,
        }
    }
}

/// Renders the `ORDER BY` body (without the keyword) for `sort` on `table`.
///
/// # Errors
///
/// Returns [`AppError::InvalidSort`] if `table` has no such column.
pub fn order_by(table: Table, sort: Sort) -> Result<String, AppError> {
    if !table.orderable().contains(&sort.field) {
        return Err(AppError::InvalidSort);
    }

    let alias = table.alias();
    let direction = sort.order.as_sql();

    if sort.field == SortField::Id {
        return Ok(format!("{alias}.id {direction}"));
    }

    Ok(format!(
        "{alias}.{field} {direction}, {alias}.id {direction}",
        field = sort.field.as_str()
    ))
}
