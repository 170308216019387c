mod common;

use axum_test::TestServer;
use sqlx::PgPool;
use link_directory::api::dto::health::HealthResponse;

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "health12", "https://example.com").await;
    common::create_test_visit(&pool, link_id, "10.0.0.1", "").await;
    common::create_test_visit(&pool, link_id, "10.0.0.2", "").await;

    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();
    let response = server.get("/health").await;

    response.assert_status_ok();

    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    assert!(body.database.ok);
    assert_eq!(body.database.links, Some(1));
    assert_eq!(body.database.visits, Some(2));
}

#[sqlx::test]
async fn test_health_check_degraded_when_pool_closed(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    pool.close().await;

    let server = TestServer::new(common::test_app(state)).unwrap();
    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "degraded");
    assert!(!body.database.ok);
    assert!(body.database.error.is_some());
}
