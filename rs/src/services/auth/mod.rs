pub mod access_jwt;
pub mod authentication;
pub mod bearer;
pub mod error;
pub mod jwt;
pub mod provider;
pub mod scopes;

pub use access_jwt::JsonWebTokenDecoder;
pub use authentication::{GrantedAuthority, JwtAuthenticationToken};
pub use bearer::{AuthenticationDetails, AuthenticationKind, BearerTokenAuthenticationToken};
pub use error::{AuthenticationError, BearerTokenError, BearerTokenErrorCode, invalid_token};
pub use jwt::{Jwt, JwtDecoder, JwtError};
pub use provider::{AuthenticationProvider, JwtAuthenticationProvider};
pub use scopes::{ScopeClaim, extract_scopes};
