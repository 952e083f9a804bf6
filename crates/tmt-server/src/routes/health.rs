//! Health route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// GET /api/health — store reachability and active provider.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let translations = state.store.count_translations()?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "translations": translations,
        "provider": state.reconciler.provider_name(),
    })))
}
