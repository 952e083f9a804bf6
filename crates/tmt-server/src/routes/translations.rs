//! Translation record routes. All of them sit behind `require_auth`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tmt_store::Translations;

use crate::error::ApiError;
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/translations/add", post(add_translation))
        .route("/translations/search", get(search_translations))
        .route("/translations/update/{id}", put(update_translation))
        .route("/translations/translate", post(preview_translation))
        .route("/translations/stats", get(translation_stats))
        .route("/translations/{id}", get(get_translation))
        .route_layer(from_fn_with_state(state, require_auth))
}

// ---------------------------------------------------------------
// Request types
// ---------------------------------------------------------------

#[derive(Deserialize, Default)]
#[serde(default)]
struct AddBody {
    key: String,
    #[serde(rename = "englishText")]
    english_text: String,
}

/// `translations` is required; languages missing inside it are stored as null.
#[derive(Deserialize)]
struct UpdateBody {
    translations: Translations,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PreviewBody {
    text: String,
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

/// POST /api/translations/add — translate and persist a new key.
async fn add_translation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let record = state
        .reconciler
        .create_record(&body.key, &body.english_text)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Translation added successfully",
            "data": record,
        })),
    ))
}

/// GET /api/translations/search?query= — key substring search.
async fn search_translations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.search.search(params.query.as_deref())?;
    Ok(Json(records))
}

/// PUT /api/translations/update/{id} — overwrite all language fields.
async fn update_translation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let record = state.reconciler.update_record(&id, body.translations)?;
    Ok(Json(serde_json::json!({
        "message": "Translation Updated successfully.",
        "data": record,
    })))
}

/// POST /api/translations/translate — fan-out preview, nothing is stored.
async fn preview_translation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PreviewBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let targets = state.reconciler.preview(&body.text).await?;
    Ok(Json(serde_json::json!({ "data": targets })))
}

/// GET /api/translations/stats
async fn translation_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.search.stats()?))
}

/// GET /api/translations/{id}
async fn get_translation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reconciler.get_record(&id)?))
}
