//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::persistence::SqliteLinkRepository;

/// State cloned into every request.
///
/// Everything here is immutable after startup; the only shared mutable
/// resource is the database behind the link repository.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub auth_service: Arc<AuthService>,
    /// Public base URL for short links; derived from `Host` when `None`.
    pub base_url: Option<String>,
    /// Largest request body the authentication layer will buffer.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<SqliteLinkRepository>>,
        auth_service: Arc<AuthService>,
        base_url: Option<String>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            base_url,
            max_body_bytes,
        }
    }
}
