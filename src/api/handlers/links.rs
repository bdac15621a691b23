//! Handler for link lookup endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::HeaderMap,
};

use crate::api::dto::link::LinkResponse;
use crate::api::handlers::fallback::ENDPOINT_NOT_FOUND_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{build_short_url, resolve_base_url};

/// Returns the stored fields of a link.
///
/// # Endpoint
///
/// `GET /api/links/{code}` (signed)
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "code": "1",
///   "url": "https://example.com",
///   "created_at": "2026-01-02T03:04:05+00:00",
///   "short_url": "http://s.example.com/1"
/// }
/// ```
///
/// # Errors
///
/// - 404 `Endpoint not found` if `code` is not made of `[0-9a-z]` or is not
///   valid UTF-8 once percent-decoded
/// - 404 `Short link not found` if no link has this code
pub async fn get_link_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LinkResponse>, AppError> {
    let Ok(Path(code)) = path else {
        return Err(AppError::not_found(ENDPOINT_NOT_FOUND_MESSAGE));
    };

    if !code
        .bytes()
        .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    {
        return Err(AppError::not_found(ENDPOINT_NOT_FOUND_MESSAGE));
    }

    let link = state.link_service.get_link_by_code(&code).await?;

    let base_url = resolve_base_url(state.base_url.as_deref(), &headers);
    let short_url = build_short_url(&base_url, &link.code);

    Ok(Json(LinkResponse::new(link, short_url)))
}
