use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::auth::bearer::AuthenticationDetails;
use crate::services::auth::jwt::Jwt;

/// A single authorization grant, e.g. `SCOPE_read`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    pub fn authority(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated principal produced from a decoded JWT.
#[derive(Debug, Clone)]
pub struct JwtAuthenticationToken {
    jwt: Jwt,
    authorities: Vec<GrantedAuthority>,
    details: AuthenticationDetails,
}

impl JwtAuthenticationToken {
    pub fn new(jwt: Jwt, authorities: Vec<GrantedAuthority>) -> Self {
        Self {
            jwt,
            authorities,
            details: AuthenticationDetails::default(),
        }
    }

    pub fn with_details(mut self, details: AuthenticationDetails) -> Self {
        self.details = details;
        self
    }

    pub fn token(&self) -> &Jwt {
        &self.jwt
    }

    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    pub fn details(&self) -> &AuthenticationDetails {
        &self.details
    }

    pub fn token_attributes(&self) -> &Map<String, Value> {
        self.jwt.claims()
    }

    /// The `sub` claim, or an empty string when the token has none.
    pub fn name(&self) -> &str {
        self.jwt.subject().unwrap_or_default()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.authority() == authority)
    }

    pub fn is_authenticated(&self) -> bool {
        true
    }
}
