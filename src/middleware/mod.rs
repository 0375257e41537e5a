/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - bearer 認証は resource_server::middleware::auth 側
 */
pub mod http;
