//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::query::Sort;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::order_by::{Table, order_by};

const SELECT_LINKS: &str = "SELECT l.id, l.original_url, l.short_name, l.created_at FROM links l";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_name: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.original_url, row.short_name, row.created_at)
    }
}

/// PostgreSQL repository for links.
///
/// Ordered listings are built with [`QueryBuilder`]; the `ORDER BY` clause is
/// rendered from the closed [`crate::domain::query::SortField`] set and
/// pagination values are bound as parameters.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn ordered(sort: Sort) -> Result<QueryBuilder<'static, Postgres>, AppError> {
        let mut qb = QueryBuilder::new(SELECT_LINKS);
        qb.push(" ORDER BY ").push(order_by(Table::Links, sort)?);
        Ok(qb)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn list_all(&self, sort: Sort) -> Result<Vec<Link>, AppError> {
        let mut qb = Self::ordered(sort)?;

        let rows = qb
            .build_query_as::<LinkRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn list_page(&self, offset: i64, count: i64, sort: Sort) -> Result<Vec<Link>, AppError> {
        let mut qb = Self::ordered(sort)?;
        qb.push(" LIMIT ")
            .push_bind(count)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<LinkRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!("{SELECT_LINKS} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!("{SELECT_LINKS} WHERE l.short_name = $1"))
            .bind(short_name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_name)
            VALUES ($1, $2)
            RETURNING id, original_url, short_name, created_at
            "#,
        )
        .bind(new_link.original_url)
        .bind(new_link.short_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, changes: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET original_url = $2, short_name = $3
            WHERE id = $1
            RETURNING id, original_url, short_name, created_at
            "#,
        )
        .bind(id)
        .bind(changes.original_url)
        .bind(changes.short_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
