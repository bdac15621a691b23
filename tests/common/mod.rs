#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum_test::{TestRequest, TestServer};
use chrono::Utc;
use link_shortener::application::services::{AuthService, LinkService};
use link_shortener::infrastructure::persistence::SqliteLinkRepository;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const SECRET: &str = "s3cr3t";
pub const HOST: &str = "s.example.com";

pub async fn create_test_repository(pool: SqlitePool) -> SqliteLinkRepository {
    SqliteLinkRepository::new(Arc::new(pool)).await.unwrap()
}

pub async fn create_test_state(pool: SqlitePool) -> AppState {
    let link_repo = Arc::new(create_test_repository(pool).await);

    AppState::new(
        Arc::new(LinkService::new(link_repo)),
        Arc::new(AuthService::new(SECRET.to_string())),
        None,
        64 * 1024,
    )
}

pub async fn create_test_app(pool: SqlitePool) -> Router {
    app_router(create_test_state(pool).await)
}

pub async fn create_test_server(pool: SqlitePool) -> TestServer {
    TestServer::new(create_test_app(pool).await).unwrap()
}

pub async fn insert_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (code, url, created_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind("2026-01-02T03:04:05+00:00")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Returns `(X-Timestamp, X-Signature)` for a request signed with [`SECRET`].
pub fn sign(timestamp: i64, method: &str, path: &str, body: &str) -> (String, String) {
    let timestamp = timestamp.to_string();
    let signature =
        AuthService::new(SECRET.to_string()).sign(&timestamp, method, path, body.as_bytes());
    (timestamp, signature)
}

/// A `POST` carrying valid authentication headers for `body`.
pub fn post_signed(server: &TestServer, path: &str, body: &str) -> TestRequest {
    let (timestamp, signature) = sign(now(), "POST", path, body);

    server
        .post(path)
        .add_header("Host", HOST)
        .add_header("X-Timestamp", timestamp)
        .add_header("X-Signature", signature)
        .bytes(Bytes::from(body.to_owned()))
}

/// A `GET` carrying valid authentication headers.
pub fn get_signed(server: &TestServer, path: &str) -> TestRequest {
    let (timestamp, signature) = sign(now(), "GET", path, "");

    server
        .get(path)
        .add_header("Host", HOST)
        .add_header("X-Timestamp", timestamp)
        .add_header("X-Signature", signature)
}
