//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service index (public)
//! - `GET  /{code}`  - Short link redirect (public)
//! - `/api/*`        - REST API (signed requests only)
//!
//! Anything else, including other methods on the public routes, answers
//! 404 `Short link not found`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - HMAC request signatures on `/api`

use crate::api;
use crate::api::handlers::{index_handler, link_not_found_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(index_handler).fallback(link_not_found_handler))
        .route(
            "/{code}",
            get(redirect_handler).fallback(link_not_found_handler),
        )
        .nest("/api", api_router)
        .fallback(link_not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
