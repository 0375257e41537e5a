/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストの principal (JwtAuthenticationToken) を handler に提供する
 * - access middleware が extensions に insert 済みである前提
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;

pub use self::core::AuthCtxExtractor;

/// 認証済みのリクエストに付与されるコンテキスト
pub type AuthCtx = crate::services::auth::JwtAuthenticationToken;
