mod common;

use axum::http::StatusCode;
use serde_json::Value;
use sqlx::SqlitePool;

#[sqlx::test]
async fn test_redirect_success(pool: SqlitePool) {
    let server = common::create_test_server(pool.clone()).await;
    common::insert_link(&pool, "1", "https://example.com/landing").await;

    let response = server.get("/1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/landing");
}

#[sqlx::test]
async fn test_redirect_preserves_target_exactly(pool: SqlitePool) {
    let server = common::create_test_server(pool.clone()).await;
    let target = "https://example.com/a%20b?q=1&r=%2F#frag";
    common::insert_link(&pool, "1", target).await;

    let response = server.get("/1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), target);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: SqlitePool) {
    let server = common::create_test_server(pool).await;

    let response = server.get("/zz").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "Short link not found");
}

#[sqlx::test]
async fn test_redirect_invalid_code(pool: SqlitePool) {
    let server = common::create_test_server(pool).await;

    for path in ["/0", "/ABC", "/favicon.ico", "/a-b", "/%FF", "/%C3%28"] {
        let response = server.get(path).await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>()["error"],
            "Short link not found",
            "path {path}"
        );
    }
}

#[sqlx::test]
async fn test_redirect_does_not_require_signature(pool: SqlitePool) {
    let server = common::create_test_server(pool.clone()).await;
    common::insert_link(&pool, "a", "https://example.com").await;

    let response = server
        .get("/a")
        .add_header("X-Timestamp", "garbage")
        .add_header("X-Signature", "garbage")
        .await;

    response.assert_status(StatusCode::FOUND);
}

#[sqlx::test]
async fn test_index(pool: SqlitePool) {
    let server = common::create_test_server(pool).await;

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Link shortener API");
}

#[sqlx::test]
async fn test_unknown_public_path(pool: SqlitePool) {
    let server = common::create_test_server(pool).await;

    for path in ["/a/b", "/1/", "/some/deep/path"] {
        let response = server.get(path).await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>()["error"],
            "Short link not found",
            "path {path}"
        );
    }
}

#[sqlx::test]
async fn test_public_routes_only_answer_get(pool: SqlitePool) {
    let server = common::create_test_server(pool.clone()).await;
    common::insert_link(&pool, "1", "https://example.com").await;

    let response = server.post("/1").await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "Short link not found");

    server.delete("/").await.assert_status_not_found();
}
