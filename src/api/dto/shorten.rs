//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request to shorten a URL.
///
/// `url` must be a JSON string; other types are rejected during
/// deserialization.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response for a created (or reused) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub target_url: String,
    pub created_at: String,
}

impl ShortenResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            created_at: link.created_at_rfc3339(),
            code: link.code,
            short_url,
            target_url: link.url,
        }
    }
}
