//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::application::services::link_service::LINK_NOT_FOUND_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Public, no signature required.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist, including path
/// segments that do not decode to UTF-8.
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Ok(Path(code)) = path else {
        return Err(AppError::not_found(LINK_NOT_FOUND_MESSAGE));
    };

    let link = state.link_service.get_link_by_code(&code).await?;

    tracing::debug!(%code, url = %link.url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, link.url)]).into_response())
}
