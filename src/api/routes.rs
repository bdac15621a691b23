//! API route configuration.
//!
//! Every endpoint here, including the unmatched-path fallback, sits behind
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{api_not_found_handler, get_link_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by request signatures.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create or reuse the short link for a URL
/// - `GET  /links/{code}`  - Look up a link by code
///
/// Other paths and methods answer 404 `Endpoint not found`.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(shorten_handler).fallback(api_not_found_handler),
        )
        .route(
            "/links/{code}",
            get(get_link_handler).fallback(api_not_found_handler),
        )
        .fallback(api_not_found_handler)
}
