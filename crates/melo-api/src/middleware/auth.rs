use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use melo_auth::jwt::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer token middleware.
///
/// Verifies `Authorization: Bearer <token>` with the shared validator. On
/// success, inserts `AuthUser` into the request extensions for handlers and
/// into the response extensions for the audit log.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    let claims = state.validator.validate(&token).await?;
    let user = AuthUser {
        sub: claims.sub.clone(),
        claims,
    };

    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);

    Ok(response)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        // Auth schemes are case-insensitive (RFC 9110 §11.1).
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
}

/// Authenticated caller extracted from token claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: Option<String>,
    pub claims: Claims,
}
