/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/me 以下は Bearer 必須
 * - Bearer が必要な範囲に resource_server の access middleware を適用する
 */
use axum::{Router, routing::get};
use resource_server::middleware::auth;

use crate::api::v1::handlers::{health::health, me::me};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));
    let protected = auth::apply(protected, state.auth.clone());

    Router::new().route("/health", get(health)).merge(protected)
}
