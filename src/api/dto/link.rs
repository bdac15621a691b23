//! DTO for link lookup endpoint.

use serde::Serialize;

use crate::domain::entities::Link;

/// Stored link fields plus its public short URL.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub created_at: String,
    pub short_url: String,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            created_at: link.created_at_rfc3339(),
            code: link.code,
            url: link.url,
            short_url,
        }
    }
}
