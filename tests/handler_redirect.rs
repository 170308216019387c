mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use link_directory::AppError;
use link_directory::application::services::LinkService;
use link_directory::domain::entities::{LinkVisit, NewLinkVisit};
use link_directory::domain::query::Sort;
use link_directory::domain::repositories::{LinkRepository, LinkVisitRepository};
use link_directory::infrastructure::persistence::PgLinkRepository;
use link_directory::state::AppState;

/// Visit store whose writes always fail.
struct BrokenVisitRepository;

#[async_trait]
impl LinkVisitRepository for BrokenVisitRepository {
    async fn create(&self, _visit: NewLinkVisit) -> Result<i64, AppError> {
        Err(AppError::internal("insert failed", json!({})))
    }

    async fn list_all(&self, _sort: Sort) -> Result<Vec<LinkVisit>, AppError> {
        Ok(Vec::new())
    }

    async fn list_page(
        &self,
        _offset: i64,
        _count: i64,
        _sort: Sort,
    ) -> Result<Vec<LinkVisit>, AppError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(0)
    }
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "redirect1", "https://example.com/target").await;
    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();

    let response = server.get("/r/redirect1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server =
        TestServer::new(common::test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server.get("/r/notfound").await;

    response.assert_status_not_found();
    let visits: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_visits")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(visits, 0);
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();

    server.get("/r/ab").await.assert_status_bad_request();
    server.get("/r/with_underscore").await.assert_status_bad_request();
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "track123", "https://example.com").await;
    let server =
        TestServer::new(common::test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server
        .get("/r/track123")
        .add_header("User-Agent", "Mozilla/5.0")
        .add_header("Referer", "https://news.example.org")
        .await;

    assert_eq!(response.status_code(), 302);

    let row: (String, String, String, i32) = sqlx::query_as(
        "SELECT ip, user_agent, referer, status FROM link_visits WHERE link_id = $1",
    )
    .bind(link_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.0, "127.0.0.1");
    assert_eq!(row.1, "Mozilla/5.0");
    assert_eq!(row.2, "https://news.example.org");
    assert_eq!(row.3, 302);
}

#[sqlx::test]
async fn test_every_redirect_is_recorded(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "popular1", "https://example.com").await;
    let server =
        TestServer::new(common::test_app(common::create_test_state(pool.clone()))).unwrap();

    for _ in 0..3 {
        assert_eq!(server.get("/r/popular1").await.status_code(), 302);
    }

    assert_eq!(common::count_visits(&pool, link_id).await, 3);
}

#[sqlx::test]
async fn test_redirect_survives_visit_failure(pool: PgPool) {
    common::create_test_link(&pool, "fragile1", "https://example.com/still-works").await;

    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let visits: Arc<dyn LinkVisitRepository> = Arc::new(BrokenVisitRepository);
    let service = Arc::new(LinkService::new(links, visits));
    let state = AppState::new(service, common::TEST_BASE_URL, false);

    let server = TestServer::new(common::test_app(state)).unwrap();
    let response = server.get("/r/fragile1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/still-works");
}
