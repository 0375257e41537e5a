//! RFC 6750 bearer token errors.
//!
//! `BearerTokenError` only ever holds attribute values that are legal inside a
//! `WWW-Authenticate` challenge, so its attributes never need escaping.

use std::{error::Error as StdError, fmt};

use axum::http::StatusCode;
use tracing::debug;

use crate::services::auth::jwt::JwtError;

/// Documentation URI attached to every `invalid_token` error.
pub const BEARER_TOKEN_ERROR_URI: &str = "https://tools.ietf.org/html/rfc6750#section-3.1";

/// Description used when the decoder's message is not charset-safe.
pub const INVALID_TOKEN_FALLBACK_DESCRIPTION: &str =
    "An error occurred while attempting to decode the Jwt: Invalid token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerTokenErrorCode {
    InvalidRequest,
    InvalidToken,
    InsufficientScope,
}

impl BearerTokenErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidToken => "invalid_token",
            Self::InsufficientScope => "insufficient_scope",
        }
    }
}

impl fmt::Display for BearerTokenErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected attribute while building a `BearerTokenError`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerTokenErrorBuildError {
    #[error("description contains characters outside the RFC 6750 error_description charset")]
    InvalidDescription,
    #[error("error uri contains characters outside the RFC 6750 error_uri charset")]
    InvalidUri,
    #[error("scope contains characters outside the RFC 6750 scope charset")]
    InvalidScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerTokenError {
    error_code: BearerTokenErrorCode,
    http_status: StatusCode,
    description: Option<String>,
    uri: Option<String>,
    scope: Option<String>,
}

impl BearerTokenError {
    /// Build an error, validating every attribute against RFC 6750 §3.
    pub fn new(
        error_code: BearerTokenErrorCode,
        http_status: StatusCode,
        description: Option<&str>,
        uri: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Self, BearerTokenErrorBuildError> {
        if !description.is_none_or(is_description_valid) {
            return Err(BearerTokenErrorBuildError::InvalidDescription);
        }
        if !uri.is_none_or(is_uri_valid) {
            return Err(BearerTokenErrorBuildError::InvalidUri);
        }
        if !scope.is_none_or(is_scope_valid) {
            return Err(BearerTokenErrorBuildError::InvalidScope);
        }

        Ok(Self {
            error_code,
            http_status,
            description: description.map(str::to_owned),
            uri: uri.map(str::to_owned),
            scope: scope.map(str::to_owned),
        })
    }

    pub fn error_code(&self) -> BearerTokenErrorCode {
        self.error_code
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for BearerTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "[{}] {}", self.error_code, description),
            None => write!(f, "[{}]", self.error_code),
        }
    }
}

// error-description = *( %x20-21 / %x23-5B / %x5D-7E )
fn is_description_valid(value: &str) -> bool {
    value
        .bytes()
        .all(|b| matches!(b, 0x20..=0x21 | 0x23..=0x5B | 0x5D..=0x7E))
}

// error-uri = *( %x21 / %x23-5B / %x5D-7E )
fn is_uri_valid(value: &str) -> bool {
    value
        .bytes()
        .all(|b| matches!(b, 0x21 | 0x23..=0x5B | 0x5D..=0x7E))
}

// scope-token = 1*( %x21 / %x23-5B / %x5D-7E ), space separated
fn is_scope_valid(value: &str) -> bool {
    is_description_valid(value)
}

/// Translate a decoder failure message into an `invalid_token` error.
///
/// Third-party validation messages are not guaranteed to fit the RFC 6750
/// charset; those fall back to a fixed description. Never fails.
pub fn invalid_token(message: &str) -> BearerTokenError {
    BearerTokenError::new(
        BearerTokenErrorCode::InvalidToken,
        StatusCode::UNAUTHORIZED,
        Some(message),
        Some(BEARER_TOKEN_ERROR_URI),
        None,
    )
    .unwrap_or_else(|err| {
        debug!(error = %err, "decoder message rejected, using generic description");
        BearerTokenError {
            error_code: BearerTokenErrorCode::InvalidToken,
            http_status: StatusCode::UNAUTHORIZED,
            description: Some(INVALID_TOKEN_FALLBACK_DESCRIPTION.to_owned()),
            uri: Some(BEARER_TOKEN_ERROR_URI.to_owned()),
            scope: None,
        }
    })
}

/// Failure to authenticate a bearer token.
///
/// `error()` is what the client gets to see. `source()` keeps the decoder's
/// original failure for logs only.
#[derive(Debug)]
pub struct AuthenticationError {
    error: BearerTokenError,
    cause: Option<JwtError>,
}

impl AuthenticationError {
    pub fn new(error: BearerTokenError) -> Self {
        Self { error, cause: None }
    }

    pub fn with_cause(error: BearerTokenError, cause: JwtError) -> Self {
        Self {
            error,
            cause: Some(cause),
        }
    }

    pub fn error(&self) -> &BearerTokenError {
        &self.error
    }

    pub fn cause(&self) -> Option<&JwtError> {
        self.cause.as_ref()
    }

    pub fn into_error(self) -> BearerTokenError {
        self.error
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bearer token authentication failed: {}", self.error)
    }
}

impl StdError for AuthenticationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<BearerTokenError> for AuthenticationError {
    fn from(error: BearerTokenError) -> Self {
        Self::new(error)
    }
}
