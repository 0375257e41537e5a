//! Bearer token (JWT) authentication for OAuth 2.0 resource servers.
//!
//! - `services::auth`: decoder boundary, scope extraction, RFC 6750 errors,
//!   and the `JwtAuthenticationProvider` tying them together
//! - `middleware::auth`: axum integration (token resolution, challenges)
//! - `extractors`: hands the authenticated principal to handlers

pub mod extractors;
pub mod middleware;
pub mod services;
pub mod state;

pub use services::auth::{
    AuthenticationError, AuthenticationProvider, JwtAuthenticationProvider,
    JwtAuthenticationToken, JwtDecoder,
};
pub use state::AuthState;
