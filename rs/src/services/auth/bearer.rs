use std::net::SocketAddr;

/// Kinds of authentication request an `AuthenticationProvider` may be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthenticationKind {
    BearerToken,
    UsernamePassword,
    Anonymous,
}

/// Request-scoped metadata carried from the transport into the principal untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationDetails {
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
}

impl AuthenticationDetails {
    pub fn new(remote_addr: Option<SocketAddr>, request_id: Option<String>) -> Self {
        Self {
            remote_addr,
            request_id,
        }
    }
}

/// An unauthenticated bearer token, as resolved from the request.
///
/// Token material is not printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerTokenAuthenticationToken {
    token: String,
    details: AuthenticationDetails,
}

impl std::fmt::Debug for BearerTokenAuthenticationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticationToken")
            .field("token", &"<redacted>")
            .field("details", &self.details)
            .finish()
    }
}

impl BearerTokenAuthenticationToken {
    pub const KIND: AuthenticationKind = AuthenticationKind::BearerToken;

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            details: AuthenticationDetails::default(),
        }
    }

    pub fn with_details(mut self, details: AuthenticationDetails) -> Self {
        self.details = details;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn details(&self) -> &AuthenticationDetails {
        &self.details
    }

    pub fn into_details(self) -> AuthenticationDetails {
        self.details
    }
}
