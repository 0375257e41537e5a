//! `WWW-Authenticate: Bearer ...` challenge responses (RFC 6750 §3).
//!
//! Error attributes are charset-checked by `BearerTokenError`; the realm comes
//! from configuration and is quoted-pair escaped here.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::services::auth::error::BearerTokenError;

/// Build the challenge header value.
///
/// Without an error this is just `Bearer` (plus realm), which is the
/// correct answer to a request that carried no credentials at all.
pub fn challenge_header_value(error: Option<&BearerTokenError>, realm: Option<&str>) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let Some(realm) = realm {
        params.push(("realm", escape_param_value(realm)));
    }
    if let Some(error) = error {
        params.push(("error", error.error_code().as_str().to_owned()));
        if let Some(description) = error.description() {
            params.push(("error_description", description.to_owned()));
        }
        if let Some(uri) = error.uri() {
            params.push(("error_uri", uri.to_owned()));
        }
        if let Some(scope) = error.scope() {
            params.push(("scope", scope.to_owned()));
        }
    }

    if params.is_empty() {
        return "Bearer".to_string();
    }

    let attributes = params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Bearer {}", attributes)
}

// quoted-string: `"` and `\` become quoted-pairs (RFC 7230 §3.2.6)
fn escape_param_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Respond with the error's status (401 when there is no error) and a challenge.
pub fn challenge(error: Option<&BearerTokenError>, realm: Option<&str>) -> Response {
    let status = error.map_or(StatusCode::UNAUTHORIZED, BearerTokenError::http_status);

    match HeaderValue::from_str(&challenge_header_value(error, realm)) {
        Ok(value) => (status, [(header::WWW_AUTHENTICATE, value)]).into_response(),
        Err(err) => {
            // Only reachable with a misconfigured realm.
            error!(error = %err, "invalid WWW-Authenticate header value");
            (
                status,
                [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::error::invalid_token;

    #[test]
    fn bare_challenge() {
        assert_eq!(challenge_header_value(None, None), "Bearer");
        assert_eq!(
            challenge_header_value(None, Some("api")),
            "Bearer realm=\"api\""
        );
    }

    #[test]
    fn invalid_token_challenge() {
        let error = invalid_token("Jwt expired");

        assert_eq!(
            challenge_header_value(Some(&error), Some("api")),
            "Bearer realm=\"api\", error=\"invalid_token\", error_description=\"Jwt expired\", \
             error_uri=\"https://tools.ietf.org/html/rfc6750#section-3.1\""
        );
    }

    #[test]
    fn challenge_response_carries_status_and_header() {
        let response = challenge(Some(&invalid_token("Jwt expired")), None);

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let header = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(header.starts_with("Bearer error=\"invalid_token\""));
    }

    #[test]
    fn realm_quotes_and_backslashes_are_escaped() {
        assert_eq!(
            challenge_header_value(None, Some("my \"api\"")),
            r#"Bearer realm="my \"api\"""#
        );
        assert_eq!(
            challenge_header_value(None, Some(r"corp\api")),
            r#"Bearer realm="corp\\api""#
        );

        let response = challenge(Some(&invalid_token("Jwt expired")), Some("my \"api\""));
        let header = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(header.starts_with(r#"Bearer realm="my \"api\"", error="invalid_token""#));
    }

    #[test]
    fn unusable_realm_still_challenges() {
        let response = challenge(None, Some("bad\nrealm"));

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Bearer"))
        );
    }
}
