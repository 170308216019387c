//! Storage port for links.

use crate::domain::entities::{Link, NewLink};
use crate::domain::query::Sort;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// Implementations must enforce `short_name` uniqueness and report a
/// violation as [`AppError::ShortNameConflict`], distinct from every other
/// failure. Listing must apply the ordering contract of
/// [`crate::infrastructure::persistence::order_by`], including the `id`
/// tie-break on non-key fields.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns every link in `sort` order.
    async fn list_all(&self, sort: Sort) -> Result<Vec<Link>, AppError>;

    /// Returns at most `count` links starting at `offset` in `sort` order.
    async fn list_page(&self, offset: i64, count: i64, sort: Sort) -> Result<Vec<Link>, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Finds a link by primary key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its exact short name.
    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a link and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortNameConflict`] if the short name is taken.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Rewrites both fields of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `id`.
    /// Returns [`AppError::ShortNameConflict`] if the new short name is taken.
    async fn update(&self, id: i64, changes: NewLink) -> Result<Link, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if `id` did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
