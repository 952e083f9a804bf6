//! Bearer-token authentication for protected routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use tmt_core::Error;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Rejects requests without a live session when `require_auth` is on.
/// The authenticated user is stored in the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.require_auth {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers())
        .map(str::to_string)
        .ok_or_else(|| Error::Unauthorized("Authentication required".to_string()))?;
    let user = state.auth.authenticate(&token)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
