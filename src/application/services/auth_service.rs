//! Request signature verification.
//!
//! Clients sign every API request with the shared secret:
//!
//! ```text
//! X-Timestamp: <unix seconds>
//! X-Signature: base64(HMAC-SHA256(secret, "<timestamp>\n<METHOD>\n<path>\n<body>"))
//! ```
//!
//! The timestamp is the raw header string, the method is uppercased, the path
//! excludes the query string and the body is the exact bytes sent.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "x-timestamp";
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Maximum distance, in seconds, between the request timestamp and the
/// server clock, in either direction.
pub const MAX_CLOCK_SKEW_SECS: u64 = 300;

/// Reasons a request fails authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication headers missing")]
    MissingHeaders,

    #[error("Invalid timestamp header")]
    InvalidTimestamp,

    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    #[error("Invalid signature")]
    InvalidSignature,
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::unauthorized(e.to_string())
    }
}

/// The parts of an HTTP request covered by the signature.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    pub timestamp: Option<&'a str>,
    pub signature: Option<&'a str>,
    pub method: &'a str,
    pub path: &'a str,
    pub body: &'a [u8],
}

/// Verifies request signatures against the shared secret.
///
/// The secret is loaded once at startup and never changes afterwards.
pub struct AuthService {
    secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `secret` - shared HMAC key; must be the one clients sign with
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    fn mac_for(&self, timestamp: &str, method: &str, path: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.as_bytes());
        mac.update(b"\n");
        mac.update(method.to_ascii_uppercase().as_bytes());
        mac.update(b"\n");
        mac.update(path.as_bytes());
        mac.update(b"\n");
        mac.update(body);
        mac
    }

    /// Computes the signature a client must send for this request.
    pub fn sign(&self, timestamp: &str, method: &str, path: &str, body: &[u8]) -> String {
        let mac = self.mac_for(timestamp, method, path, body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Verifies a request against the current system time.
    ///
    /// # Errors
    ///
    /// See [`Self::verify_at`].
    pub fn verify(&self, request: &SignedRequest<'_>) -> Result<(), AuthError> {
        self.verify_at(request, Utc::now().timestamp())
    }

    /// Verifies a request as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingHeaders`] if either header is absent or empty
    /// - [`AuthError::InvalidTimestamp`] if the timestamp is not all digits
    /// - [`AuthError::TimestampOutOfRange`] if it is more than
    ///   [`MAX_CLOCK_SKEW_SECS`] away from `now`
    /// - [`AuthError::InvalidSignature`] if the signature does not match
    pub fn verify_at(&self, request: &SignedRequest<'_>, now: i64) -> Result<(), AuthError> {
        let (timestamp, signature) = match (request.timestamp, request.signature) {
            (Some(t), Some(s)) if !t.is_empty() && !s.is_empty() => (t, s),
            _ => return Err(AuthError::MissingHeaders),
        };

        if !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::InvalidTimestamp);
        }

        // Digit strings too large for i64 are necessarily out of range.
        let issued_at: i64 = timestamp
            .parse()
            .map_err(|_| AuthError::TimestampOutOfRange)?;

        if now.abs_diff(issued_at) > MAX_CLOCK_SKEW_SECS {
            return Err(AuthError::TimestampOutOfRange);
        }

        let supplied = STANDARD
            .decode(signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        self.mac_for(timestamp, request.method, request.path, request.body)
            .verify_slice(&supplied)
            .map_err(|_| AuthError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const BODY: &[u8] = br#"{"url":"https://example.com"}"#;

    fn service() -> AuthService {
        AuthService::new("s3cr3t".to_string())
    }

    fn signed<'a>(timestamp: &'a str, signature: &'a str, body: &'a [u8]) -> SignedRequest<'a> {
        SignedRequest {
            timestamp: Some(timestamp),
            signature: Some(signature),
            method: "POST",
            path: "/api/shorten",
            body,
        }
    }

    #[test]
    fn test_valid_signature_accepted() {
        let svc = service();
        let ts = NOW.to_string();
        let sig = svc.sign(&ts, "POST", "/api/shorten", BODY);

        assert!(svc.verify_at(&signed(&ts, &sig, BODY), NOW).is_ok());
    }

    #[test]
    fn test_signature_matches_reference_construction() {
        let svc = service();
        let mut mac = HmacSha256::new_from_slice(b"s3cr3t").unwrap();
        mac.update(b"1700000000\nPOST\n/api/shorten\n{\"url\":\"https://example.com\"}");
        let expected = STANDARD.encode(mac.finalize().into_bytes());

        assert_eq!(svc.sign("1700000000", "post", "/api/shorten", BODY), expected);
    }

    #[test]
    fn test_missing_headers() {
        let svc = service();
        let mut req = signed("1", "sig", BODY);

        req.timestamp = None;
        assert_eq!(svc.verify_at(&req, NOW), Err(AuthError::MissingHeaders));

        req.timestamp = Some("1");
        req.signature = None;
        assert_eq!(svc.verify_at(&req, NOW), Err(AuthError::MissingHeaders));

        req.signature = Some("");
        assert_eq!(svc.verify_at(&req, NOW), Err(AuthError::MissingHeaders));
    }

    #[test]
    fn test_non_digit_timestamp() {
        let svc = service();
        for ts in ["-1700000000", "1700000000.5", "abc", " 1700000000"] {
            assert_eq!(
                svc.verify_at(&signed(ts, "sig", BODY), NOW),
                Err(AuthError::InvalidTimestamp),
                "timestamp {ts:?}"
            );
        }
    }

    #[test]
    fn test_freshness_window_boundaries() {
        let svc = service();

        let accept = |age: i64| {
            let ts = (NOW - age).to_string();
            let sig = svc.sign(&ts, "POST", "/api/shorten", BODY);
            svc.verify_at(&signed(&ts, &sig, BODY), NOW)
        };

        assert!(accept(299).is_ok());
        assert!(accept(300).is_ok());
        assert_eq!(accept(301), Err(AuthError::TimestampOutOfRange));
        assert!(accept(-299).is_ok());
        assert_eq!(accept(-301), Err(AuthError::TimestampOutOfRange));
    }

    #[test]
    fn test_huge_timestamp_out_of_range() {
        let svc = service();
        let ts = "99999999999999999999999";
        assert_eq!(
            svc.verify_at(&signed(ts, "sig", BODY), NOW),
            Err(AuthError::TimestampOutOfRange)
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let svc = service();
        let ts = NOW.to_string();
        let sig = svc.sign(&ts, "POST", "/api/shorten", BODY);

        let mut tampered = BODY.to_vec();
        tampered[10] ^= 0x01;

        assert_eq!(
            svc.verify_at(&signed(&ts, &sig, &tampered), NOW),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_method_and_path_are_signed() {
        let svc = service();
        let ts = NOW.to_string();
        let sig = svc.sign(&ts, "POST", "/api/shorten", BODY);

        let mut req = signed(&ts, &sig, BODY);
        req.method = "PUT";
        assert_eq!(svc.verify_at(&req, NOW), Err(AuthError::InvalidSignature));

        let mut req = signed(&ts, &sig, BODY);
        req.path = "/api/links/1";
        assert_eq!(svc.verify_at(&req, NOW), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_secret_matters() {
        let ts = NOW.to_string();
        let sig = AuthService::new("other".to_string()).sign(&ts, "POST", "/api/shorten", BODY);

        assert_eq!(
            service().verify_at(&signed(&ts, &sig, BODY), NOW),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let svc = service();
        let ts = NOW.to_string();
        assert_eq!(
            svc.verify_at(&signed(&ts, "not base64!", BODY), NOW),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_auth_error_maps_to_unauthorized() {
        let err: AppError = AuthError::TimestampOutOfRange.into();
        assert!(matches!(
            err,
            AppError::Unauthorized { ref message } if message == "Timestamp out of range"
        ));
    }
}
