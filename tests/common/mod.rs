#![allow(dead_code)]

use axum::Router;
use axum::extract::connect_info::MockConnectInfo;
use axum::routing::get;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use link_directory::api::handlers::{health_handler, redirect_handler};
use link_directory::api::routes::api_routes;
use link_directory::server::build_link_service;
use link_directory::state::AppState;

pub const TEST_BASE_URL: &str = "https://s.example.com";

pub fn create_test_state(pool: PgPool) -> AppState {
    let link_service = Arc::new(build_link_service(Arc::new(pool)));
    AppState::new(link_service, TEST_BASE_URL, false)
}

/// Full route table without the outer middleware, with a fixed peer address.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/r/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 12345))))
}

pub async fn create_test_link(pool: &PgPool, short_name: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (original_url, short_name) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(short_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts `count` links named `link0001`, `link0002`, ... and returns their ids.
pub async fn create_numbered_links(pool: &PgPool, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for n in 1..=count {
        let id = create_test_link(
            pool,
            &format!("link{:04}", n),
            &format!("https://example.com/{}", n),
        )
        .await;
        ids.push(id);
    }
    ids
}

pub async fn create_test_visit(pool: &PgPool, link_id: i64, ip: &str, referer: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO link_visits (link_id, ip, user_agent, referer, status) \
         VALUES ($1, $2, 'TestBot/1.0', $3, 302) RETURNING id",
    )
    .bind(link_id)
    .bind(ip)
    .bind(referer)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_visits(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM link_visits WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
