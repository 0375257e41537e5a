/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: auth: AuthState (provider + realm)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use resource_server::AuthState;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: AuthState,
}

impl AppState {
    pub fn new(auth: AuthState) -> Self {
        Self { auth }
    }
}
