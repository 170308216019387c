mod common;

use axum_test::TestServer;
use serde_json::Value;
use sqlx::PgPool;
use link_directory::api::dto::link_visit::LinkVisitResponse;

#[sqlx::test]
async fn test_list_visits_unranged(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "visited1", "https://example.com").await;
    common::create_test_visit(&pool, link_id, "10.0.0.1", "").await;
    common::create_test_visit(&pool, link_id, "10.0.0.2", "https://news.example.org").await;

    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();
    let response = server.get("/api/link_visits").await;

    response.assert_status_ok();
    assert!(response.headers().get("content-range").is_none());

    let visits: Vec<LinkVisitResponse> = response.json();
    assert_eq!(visits.len(), 2);
    assert!(visits.iter().all(|v| v.link_id == link_id && v.status == 302));
}

#[sqlx::test]
async fn test_list_visits_ranged(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "visited1", "https://example.com").await;
    for n in 0..11 {
        common::create_test_visit(&pool, link_id, &format!("10.0.0.{}", n), "").await;
    }

    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();

    let response = server
        .get("/api/link_visits")
        .add_query_param("range", "[8,17]")
        .add_query_param("sort", r#"["id","ASC"]"#)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-range"), "link_visits 8-10/11");
    assert_eq!(response.json::<Vec<LinkVisitResponse>>().len(), 3);

    let response = server
        .get("/api/link_visits")
        .add_query_param("range", "[20,29]")
        .await;
    assert_eq!(response.header("content-range"), "link_visits */11");
}

#[sqlx::test]
async fn test_list_visits_legacy_sort_alias(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "visited1", "https://example.com").await;
    common::create_test_visit(&pool, link_id, "10.0.0.1", "https://b.example.org").await;
    common::create_test_visit(&pool, link_id, "10.0.0.2", "https://a.example.org").await;

    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();
    let response = server
        .get("/api/link_visits")
        .add_query_param("sort", r#"["reffer","ASC"]"#)
        .await;

    response.assert_status_ok();
    let visits: Vec<LinkVisitResponse> = response.json();
    assert_eq!(visits[0].referer, "https://a.example.org");
}

#[sqlx::test]
async fn test_list_visits_rejects_link_fields(pool: PgPool) {
    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();

    let response = server
        .get("/api/link_visits")
        .add_query_param("sort", r#"["short_name","ASC"]"#)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "sort");
}
