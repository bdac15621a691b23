//! Request signature authentication middleware.

use axum::{
    body::{Body, to_bytes},
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

use crate::application::services::SignedRequest;
use crate::application::services::auth_service::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::{error::AppError, state::AppState};

/// Authenticates requests signed with the shared secret.
///
/// # Header Format
///
/// ```text
/// X-Timestamp: 1700000000
/// X-Signature: <base64 HMAC-SHA256>
/// ```
///
/// The body is buffered (up to `AppState::max_body_bytes`) so the exact bytes
/// can be verified, then handed to the handler unchanged. The signed path is
/// the one the client requested, before any router nesting strips prefixes.
///
/// # Errors
///
/// Returns `401 Unauthorized` with the failure reason if verification fails,
/// `413 Payload Too Large` if the body exceeds the limit.
///
/// # Example
///
/// ```rust,ignore
/// let protected = api::routes::protected_routes()
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();

    let bytes = to_bytes(body, st.max_body_bytes)
        .await
        .map_err(|_| AppError::payload_too_large("Request body too large"))?;

    let path = parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_owned())
        .unwrap_or_else(|| parts.uri.path().to_owned());

    let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());

    let signed = SignedRequest {
        timestamp: header(TIMESTAMP_HEADER),
        signature: header(SIGNATURE_HEADER),
        method: parts.method.as_str(),
        path: &path,
        body: &bytes,
    };

    if let Err(reason) = st.auth_service.verify(&signed) {
        tracing::warn!(%reason, method = %parts.method, %path, "Rejected API request");
        return Err(reason.into());
    }

    let req = Request::from_parts(parts, Body::from(bytes));

    Ok(next.run(req).await)
}
