use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;
use tracing::warn;

use service::auth::domain::LoginInput;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponse), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, Json(input): Json<LoginInput>) -> Result<Json<LoginOutput>, JsonApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { token: session.token }))
}

/// Guard for mutating routes: `Authorization: Bearer <token>` of an admin.
/// Missing or invalid token is 401, a valid non-admin token is 403.
pub async fn require_admin(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_owned();
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let Some(token) = token else {
        warn!(path = %path, "missing bearer token");
        return Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("Missing bearer token.".into())));
    };

    let claims = state.auth.authorize_admin(&token).map_err(|e| {
        warn!(path = %path, code = e.code(), "admin check failed");
        JsonApiError::from(e)
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
