/// Factory: build the bearer authentication stack from application `Config`.
use std::sync::Arc;

use resource_server::services::auth::JsonWebTokenDecoder;
use resource_server::{AuthState, JwtAuthenticationProvider};

use crate::config::Config;
use crate::error::AppError;

pub fn build_auth_state(config: &Config) -> Result<AuthState, AppError> {
    let decoder = JsonWebTokenDecoder::from_ed_pem(&config.access_jwt_public_key_pem)
        .map_err(|e| {
            tracing::warn!(error = %e, "failed to parse access JWT public key PEM (expected Ed25519)");
            AppError::VerificationKey(e)
        })?
        .with_issuer(&config.auth_issuer)
        .with_audience(&config.auth_audience)
        .with_leeway(config.access_token_leeway_seconds);

    let provider = JwtAuthenticationProvider::new(Arc::new(decoder));

    let state = AuthState::new(Arc::new(provider));
    Ok(match &config.auth_realm {
        Some(realm) => state.with_realm(realm.clone()),
        None => state,
    })
}
