//! Storage port for visit records.

use crate::domain::entities::{LinkVisit, NewLinkVisit};
use crate::domain::query::Sort;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of redirect visits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkVisitRepository: Send + Sync {
    /// Inserts a visit and returns its id.
    async fn create(&self, visit: NewLinkVisit) -> Result<i64, AppError>;

    async fn list_all(&self, sort: Sort) -> Result<Vec<LinkVisit>, AppError>;

    async fn list_page(
        &self,
        offset: i64,
        count: i64,
        sort: Sort,
    ) -> Result<Vec<LinkVisit>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
