//! Bearer access token (JWT) authentication → principal を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を resolver で取り出す
//! - provider (JwtAuthenticationProvider) で decode/scope 展開
//! - 成功時: `JwtAuthenticationToken` を request extensions に格納
//! - 失敗時: RFC 6750 の `WWW-Authenticate` challenge で 401 を返す

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::middleware::auth::challenge::challenge;
use crate::middleware::auth::resolver::resolve_bearer_token;
use crate::services::auth::{AuthenticationDetails, BearerTokenAuthenticationToken};
use crate::state::AuthState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Require bearer authentication on every route of `router`.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = resource_server::middleware::auth::apply(v1, auth_state);
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, auth: AuthState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(auth, access_middleware))
}

async fn access_middleware(
    State(auth): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = match resolve_bearer_token(req.headers()) {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::debug!("no bearer token on protected route");
            return challenge(None, auth.realm());
        }
        Err(err) => {
            tracing::warn!(error = %err, "malformed bearer token");
            return challenge(Some(&err), auth.realm());
        }
    };

    let bearer = BearerTokenAuthenticationToken::new(token).with_details(request_details(&req));

    let principal = match auth.provider().authenticate(bearer).await {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(
                error = %err,
                cause = ?err.cause(),
                "access token authentication failed"
            );
            return challenge(Some(err.error()), auth.realm());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(principal);

    next.run(req).await
}

fn request_details(req: &Request<Body>) -> AuthenticationDetails {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    AuthenticationDetails::new(remote_addr, request_id)
}
