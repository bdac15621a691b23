//! Handler for the service index.

use axum::Json;

use crate::api::dto::index::IndexResponse;

/// Identifies the service.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Link shortener API",
    })
}
