//! Handler for link shortening endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::link_service::INVALID_URL_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{build_short_url, resolve_base_url};

/// Creates (or reuses) the short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten` (signed)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created` with `Location` set to the short URL:
///
/// ```json
/// {
///   "code": "1",
///   "short_url": "http://s.example.com/1",
///   "target_url": "https://example.com",
///   "created_at": "2026-01-02T03:04:05+00:00"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is empty or not JSON
/// - 422 if `url` is missing, not a string, or not a valid URL
///
/// The body is taken as raw bytes so that no `Content-Type` is required and
/// parse failures map to the statuses above.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_payload(&body)?;

    let link = state.link_service.shorten(&payload.url).await?;

    let base_url = resolve_base_url(state.base_url.as_deref(), &headers);
    let short_url = build_short_url(&base_url, &link.code);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, short_url.clone())],
        Json(ShortenResponse::new(link, short_url)),
    ))
}

fn parse_payload(body: &[u8]) -> Result<ShortenRequest, AppError> {
    if body.is_empty() {
        return Err(AppError::bad_request("Request body is required", None));
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        AppError::bad_request("Invalid JSON payload", Some(Value::String(e.to_string())))
    })?;

    if !value.is_object() {
        return Err(AppError::validation(INVALID_URL_MESSAGE));
    }

    serde_json::from_value(value).map_err(|_| AppError::validation(INVALID_URL_MESSAGE))
}
