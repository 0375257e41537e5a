/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - bearer 認証 (auth::apply) と challenge 応答
 */
pub mod auth;
