/*
 * Responsibility
 * - access middleware が共有するコンテキスト (AuthState)
 *   - provider: Arc<dyn AuthenticationProvider>, realm
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthenticationProvider;

#[derive(Clone)]
pub struct AuthState {
    provider: Arc<dyn AuthenticationProvider>,
    realm: Option<String>,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

impl AuthState {
    pub fn new(provider: Arc<dyn AuthenticationProvider>) -> Self {
        Self {
            provider,
            realm: None,
        }
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn provider(&self) -> &dyn AuthenticationProvider {
        self.provider.as_ref()
    }

    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }
}
