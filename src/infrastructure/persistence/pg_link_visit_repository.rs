//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{LinkVisit, NewLinkVisit};
use crate::domain::query::Sort;
use crate::domain::repositories::LinkVisitRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::order_by::{Table, order_by};

const SELECT_VISITS: &str = "SELECT v.id, v.link_id, v.created_at, v.ip, v.user_agent, v.referer, v.status FROM link_visits v";

#[derive(sqlx::FromRow)]
struct LinkVisitRow {
    id: i64,
    link_id: i64,
    created_at: DateTime<Utc>,
    ip: String,
    user_agent: String,
    referer: String,
    status: i32,
}

impl From<LinkVisitRow> for LinkVisit {
    fn from(row: LinkVisitRow) -> Self {
        LinkVisit {
            id: row.id,
            link_id: row.link_id,
            created_at: row.created_at,
            ip: row.ip,
            user_agent: row.user_agent,
            referer: row.referer,
            status: row.status,
        }
    }
}

/// PostgreSQL repository for visit records.
pub struct PgLinkVisitRepository {
    pool: Arc<PgPool>,
}

impl PgLinkVisitRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn ordered(sort: Sort) -> Result<QueryBuilder<'static, Postgres>, AppError> {
        let mut qb = QueryBuilder::new(SELECT_VISITS);
        qb.push(" ORDER BY ").push(order_by(Table::LinkVisits, sort)?);
        Ok(qb)
    }
}

#[async_trait]
impl LinkVisitRepository for PgLinkVisitRepository {
    async fn create(&self, visit: NewLinkVisit) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO link_visits (link_id, created_at, ip, user_agent, referer, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(visit.link_id)
        .bind(visit.created_at)
        .bind(visit.ip)
        .bind(visit.user_agent)
        .bind(visit.referer)
        .bind(visit.status)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn list_all(&self, sort: Sort) -> Result<Vec<LinkVisit>, AppError> {
        let mut qb = Self::ordered(sort)?;

        let rows = qb
            .build_query_as::<LinkVisitRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(LinkVisit::from).collect())
    }

    async fn list_page(
        &self,
        offset: i64,
        count: i64,
        sort: Sort,
    ) -> Result<Vec<LinkVisit>, AppError> {
        let mut qb = Self::ordered(sort)?;
        qb.push(" LIMIT ")
            .push_bind(count)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<LinkVisitRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(LinkVisit::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
