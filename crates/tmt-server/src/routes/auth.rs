//! Registration, login and session routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tmt_auth::PublicUser;
use tmt_core::Error;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::bearer_token;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoginBody {
    email: String,
    password: String,
}

/// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let response = state.auth.register(&body.name, &body.email, &body.password)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let response = state.auth.login(&body.email, &body.password)?;
    info!("User {} logged in", response.user.id);
    Ok(Json(response))
}

/// POST /api/auth/logout
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = required_token(&headers)?;
    state.auth.logout(token)?;
    Ok(Json(serde_json::json!({ "message": "Logged out successfully" })))
}

/// GET /api/auth/me
async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = required_token(&headers)?;
    let user = state.auth.authenticate(token)?;
    Ok(Json(serde_json::json!({ "user": PublicUser::from(&user) })))
}

fn required_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    bearer_token(headers)
        .ok_or_else(|| ApiError(Error::Unauthorized("Authentication required".to_string())))
}
