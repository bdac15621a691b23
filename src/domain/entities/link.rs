//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, SecondsFormat, Utc};

/// A stored mapping between a short code and its target URL.
///
/// `code` is always `codec::encode(id)`; the two never disagree for a
/// committed link.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            url,
            created_at,
        }
    }

    /// Creation time as stored and served: RFC 3339, whole seconds, `+00:00`.
    pub fn created_at_rfc3339(&self) -> String {
        format_timestamp(self.created_at)
    }
}

/// Formats a timestamp the way links are persisted.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}
