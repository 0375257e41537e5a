//! Decoded JWT and the pluggable decoder boundary.
//!
//! The provider never verifies signatures or temporal claims itself. Whatever
//! implements `JwtDecoder` owns that, and hands back a `Jwt` only for tokens it
//! accepted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A decoded and validated JWT.
///
/// Claims are kept as raw JSON so that claim shape (string vs. array) stays
/// observable to the scope extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Jwt {
    token_value: String,
    headers: Map<String, Value>,
    claims: Map<String, Value>,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl Jwt {
    /// `iat` / `exp` are lifted from the claims when they are numeric.
    pub fn new(
        token_value: impl Into<String>,
        headers: Map<String, Value>,
        claims: Map<String, Value>,
    ) -> Self {
        let issued_at = claims.get("iat").and_then(numeric_date);
        let expires_at = claims.get("exp").and_then(numeric_date);

        Self {
            token_value: token_value.into(),
            headers,
            claims,
            issued_at,
            expires_at,
        }
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn subject(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

// RFC 7519 NumericDate: seconds since epoch, fractional part allowed.
fn numeric_date(value: &Value) -> Option<DateTime<Utc>> {
    let secs = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))?;
    DateTime::from_timestamp(secs, 0)
}

/// Rejection raised by a `JwtDecoder`.
///
/// The `Display` text is what the provider feeds into the RFC 6750 error
/// translator, so decoders should keep it human readable.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("An error occurred while attempting to decode the Jwt: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Invalid(String),
}

impl JwtError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Decode(e)
    }
}

/// Turns a raw bearer token into a validated `Jwt`.
///
/// Implementations may perform I/O (key fetches etc.). Timeouts and
/// cancellation are theirs to configure.
#[async_trait]
pub trait JwtDecoder: Send + Sync {
    async fn decode(&self, token: &str) -> Result<Jwt, JwtError>;
}
