//! Helpers for classifying PostgreSQL errors.

/// Unique constraint guarding `links.short_name`.
pub const SHORT_NAME_CONSTRAINT: &str = "links_short_name_key";

/// Returns true when `e` is a unique violation on the short name constraint.
pub fn is_short_name_conflict(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_NAME_CONSTRAINT))
}
