/*
 * Responsibility
 * - GET /me (Bearer 必須)
 * - 認証済み principal (subject / authorities / token 時刻 / details) をそのまま返す
 */
use axum::Json;
use resource_server::extractors::AuthCtxExtractor;
use resource_server::services::auth::GrantedAuthority;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub sub: String,
    pub authorities: Vec<GrantedAuthority>,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub remote_addr: Option<String>,
    pub request_id: Option<String>,
}

pub async fn me(AuthCtxExtractor(principal): AuthCtxExtractor) -> Json<MeResponse> {
    let jwt = principal.token();
    let details = principal.details();

    Json(MeResponse {
        sub: principal.name().to_string(),
        authorities: principal.authorities().to_vec(),
        issued_at: jwt.issued_at().map(|t| t.timestamp()),
        expires_at: jwt.expires_at().map(|t| t.timestamp()),
        remote_addr: details.remote_addr.map(|a| a.to_string()),
        request_id: details.request_id.clone(),
    })
}
