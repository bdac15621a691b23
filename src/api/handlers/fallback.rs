//! Handlers for requests no route matches.

use crate::application::services::link_service::LINK_NOT_FOUND_MESSAGE;
use crate::error::AppError;

pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Unknown `/api/*` path or method. Runs after authentication.
pub async fn api_not_found_handler() -> AppError {
    AppError::not_found(ENDPOINT_NOT_FOUND_MESSAGE)
}

/// Any other path is treated as a short code that does not exist.
pub async fn link_not_found_handler() -> AppError {
    AppError::not_found(LINK_NOT_FOUND_MESSAGE)
}
