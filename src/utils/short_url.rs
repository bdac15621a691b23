//! Public short URL construction.

use axum::http::{HeaderMap, header};

/// Resolves the base URL short links are served under.
///
/// A configured base URL wins. Otherwise the request's `Host` header is used
/// as-is (port included) over plain `http`, falling back to `localhost` when
/// the header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com:8080".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers), "http://s.example.com:8080");
/// assert_eq!(resolve_base_url(Some("https://go.example"), &headers), "https://go.example");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");

    format!("http://{host}")
}

/// Joins a base URL and a code.
pub fn build_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_resolve_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));

        assert_eq!(resolve_base_url(None, &headers), "http://s.example.com");
    }

    #[test]
    fn test_resolve_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(resolve_base_url(None, &headers), "http://localhost:3000");
    }

    #[test]
    fn test_resolve_missing_host() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_base_url(None, &headers), "http://localhost");
    }

    #[test]
    fn test_configured_base_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:3000"));

        assert_eq!(
            resolve_base_url(Some("https://go.example.com/"), &headers),
            "https://go.example.com"
        );
    }

    #[test]
    fn test_build_short_url() {
        assert_eq!(build_short_url("http://s.example.com", "1"), "http://s.example.com/1");
        assert_eq!(build_short_url("http://s.example.com/", "zz"), "http://s.example.com/zz");
    }
}
