//! `Authorization: Bearer <token>` resolution (RFC 6750 §2.1).

use axum::http::{HeaderMap, header};

use crate::services::auth::error::{BearerTokenError, invalid_token};

const BEARER_SCHEME: &str = "bearer";

/// Resolve the bearer token from request headers.
///
/// - `Ok(None)`: no `Authorization` header, or a different scheme
/// - `Ok(Some(token))`: well-formed bearer credentials
/// - `Err(_)`: bearer scheme with a malformed token
pub fn resolve_bearer_token(headers: &HeaderMap) -> Result<Option<String>, BearerTokenError> {
    let Some(authorization) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(None);
    };

    let is_bearer = authorization
        .get(..BEARER_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_SCHEME));
    if !is_bearer {
        return Ok(None);
    }

    authorization[BEARER_SCHEME.len()..]
        .strip_prefix(' ')
        .filter(|token| is_token68(token))
        .map(|token| Some(token.to_owned()))
        .ok_or_else(|| invalid_token("Bearer token is malformed"))
}

// b64token = 1*( ALPHA / DIGIT / "-" / "." / "_" / "~" / "+" / "/" ) *"="
fn is_token68(value: &str) -> bool {
    let body = value.trim_end_matches('=');
    !body.is_empty()
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'+' | b'/'))
}
