//! Link creation and retrieval service.

use std::sync::Arc;
use validator::ValidateUrl;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::codec;

pub const INVALID_URL_MESSAGE: &str = "A valid url field is required";
pub const LINK_NOT_FOUND_MESSAGE: &str = "Short link not found";

/// Service for creating and retrieving shortened links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Shortens `long_url`, reusing the existing link for an already known URL.
    ///
    /// Surrounding whitespace is trimmed before validation and storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the trimmed URL is empty or not a
    /// valid absolute URL. Returns [`AppError::Internal`] on storage faults.
    pub async fn shorten(&self, long_url: &str) -> Result<Link, AppError> {
        let url = long_url.trim();

        if url.is_empty() || url.chars().any(char::is_control) || !url.validate_url() {
            return Err(AppError::validation(INVALID_URL_MESSAGE));
        }

        self.link_repository.create(url).await
    }

    /// Retrieves a link by its short code.
    ///
    /// Strings that are not valid codes are answered without touching the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        if !codec::is_valid_code(code) {
            return Err(AppError::not_found(LINK_NOT_FOUND_MESSAGE));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(LINK_NOT_FOUND_MESSAGE))
    }

    /// Counts stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}
