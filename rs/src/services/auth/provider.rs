//! JWT bearer token authentication.
//!
//! Decodes the token through the configured `JwtDecoder`, turns its scopes
//! into `SCOPE_`-prefixed authorities and returns the principal. Decoder
//! failures come back as RFC 6750 `invalid_token` errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::services::auth::authentication::{GrantedAuthority, JwtAuthenticationToken};
use crate::services::auth::bearer::{AuthenticationKind, BearerTokenAuthenticationToken};
use crate::services::auth::error::{AuthenticationError, invalid_token};
use crate::services::auth::jwt::JwtDecoder;
use crate::services::auth::scopes::{SCOPE_AUTHORITY_PREFIX, extract_scopes};

/// A mechanism able to authenticate bearer token requests.
///
/// The trait is bearer-only: `authenticate` takes a
/// `BearerTokenAuthenticationToken`, so username/password or anonymous
/// mechanisms cannot implement it. `supports` lets a dispatcher choose among
/// several bearer implementations (or skip this layer entirely for other
/// `AuthenticationKind`s) without attempting authentication.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn authenticate(
        &self,
        request: BearerTokenAuthenticationToken,
    ) -> Result<JwtAuthenticationToken, AuthenticationError>;

    fn supports(&self, kind: AuthenticationKind) -> bool;
}

#[derive(Clone)]
pub struct JwtAuthenticationProvider {
    jwt_decoder: Arc<dyn JwtDecoder>,
}

impl std::fmt::Debug for JwtAuthenticationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticationProvider").finish_non_exhaustive()
    }
}

impl JwtAuthenticationProvider {
    pub fn new(jwt_decoder: Arc<dyn JwtDecoder>) -> Self {
        Self { jwt_decoder }
    }
}

#[async_trait]
impl AuthenticationProvider for JwtAuthenticationProvider {
    async fn authenticate(
        &self,
        bearer: BearerTokenAuthenticationToken,
    ) -> Result<JwtAuthenticationToken, AuthenticationError> {
        let jwt = match self.jwt_decoder.decode(bearer.token()).await {
            Ok(jwt) => jwt,
            Err(failed) => {
                debug!(error = %failed, "jwt decoding failed");
                let error = invalid_token(&failed.to_string());
                return Err(AuthenticationError::with_cause(error, failed));
            }
        };

        let authorities: Vec<GrantedAuthority> = extract_scopes(jwt.claims())
            .into_iter()
            .map(|scope| GrantedAuthority::new(format!("{SCOPE_AUTHORITY_PREFIX}{scope}")))
            .collect();

        debug!(
            sub = jwt.subject().unwrap_or_default(),
            authorities = authorities.len(),
            "bearer token authenticated"
        );

        Ok(JwtAuthenticationToken::new(jwt, authorities).with_details(bearer.into_details()))
    }

    fn supports(&self, kind: AuthenticationKind) -> bool {
        kind == BearerTokenAuthenticationToken::KIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::error::{BearerTokenErrorCode, INVALID_TOKEN_FALLBACK_DESCRIPTION};
    use crate::services::auth::jwt::{Jwt, JwtError};
    use serde_json::{Map, Value, json};

    struct StaticDecoder(Value);

    #[async_trait]
    impl JwtDecoder for StaticDecoder {
        async fn decode(&self, token: &str) -> Result<Jwt, JwtError> {
            let Value::Object(claims) = self.0.clone() else {
                return Err(JwtError::invalid("claims must be an object"));
            };
            Ok(Jwt::new(token, Map::new(), claims))
        }
    }

    struct FailingDecoder(&'static str);

    #[async_trait]
    impl JwtDecoder for FailingDecoder {
        async fn decode(&self, _token: &str) -> Result<Jwt, JwtError> {
            Err(JwtError::invalid(self.0))
        }
    }

    fn provider(decoder: impl JwtDecoder + 'static) -> JwtAuthenticationProvider {
        JwtAuthenticationProvider::new(Arc::new(decoder))
    }

    fn authorities(principal: &JwtAuthenticationToken) -> Vec<&str> {
        principal
            .authorities()
            .iter()
            .map(GrantedAuthority::authority)
            .collect()
    }

    #[tokio::test]
    async fn scopes_become_prefixed_authorities() {
        let provider = provider(StaticDecoder(json!({"sub": "alice", "scope": "a b c"})));

        let principal = provider
            .authenticate(BearerTokenAuthenticationToken::new("token"))
            .await
            .unwrap();

        assert_eq!(authorities(&principal), vec!["SCOPE_a", "SCOPE_b", "SCOPE_c"]);
        assert_eq!(principal.token().token_value(), "token");
        assert_eq!(principal.name(), "alice");
    }

    #[tokio::test]
    async fn scp_list_is_used_when_scope_absent() {
        let provider = provider(StaticDecoder(json!({"scp": ["x", "y"]})));

        let principal = provider
            .authenticate(BearerTokenAuthenticationToken::new("token"))
            .await
            .unwrap();

        assert_eq!(authorities(&principal), vec!["SCOPE_x", "SCOPE_y"]);
    }

    #[tokio::test]
    async fn no_scopes_means_no_authorities() {
        let provider = provider(StaticDecoder(json!({"scope": ""})));

        let principal = provider
            .authenticate(BearerTokenAuthenticationToken::new("token"))
            .await
            .unwrap();

        assert!(principal.authorities().is_empty());
    }

    #[tokio::test]
    async fn decode_failure_becomes_invalid_token() {
        let provider = provider(FailingDecoder("Jwt expired"));

        let err = provider
            .authenticate(BearerTokenAuthenticationToken::new("token"))
            .await
            .unwrap_err();

        assert_eq!(err.error().error_code(), BearerTokenErrorCode::InvalidToken);
        assert_eq!(err.error().description(), Some("Jwt expired"));
        assert_eq!(err.cause().map(ToString::to_string).as_deref(), Some("Jwt expired"));
    }

    #[tokio::test]
    async fn unsafe_decode_message_is_replaced() {
        let provider = provider(FailingDecoder("Malformed payload: \"{\\\"\""));

        let err = provider
            .authenticate(BearerTokenAuthenticationToken::new("token"))
            .await
            .unwrap_err();

        assert_eq!(
            err.error().description(),
            Some(INVALID_TOKEN_FALLBACK_DESCRIPTION)
        );
    }

    #[test]
    fn supports_only_bearer_tokens() {
        let provider = provider(FailingDecoder("unused"));

        assert!(provider.supports(AuthenticationKind::BearerToken));
        assert!(!provider.supports(AuthenticationKind::UsernamePassword));
        assert!(!provider.supports(AuthenticationKind::Anonymous));
    }
}
