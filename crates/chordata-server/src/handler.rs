use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;

use chordata_inspect::SnapshotProvider;

use crate::assets::{AssetBundle, APP_CSS, APP_JS, INDEX_HTML};
use crate::error::{ServerError, ServerResult, NOT_FOUND_PAGE};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SnapshotProvider>,
    pub assets: Arc<AssetBundle>,
}

impl AppState {
    pub fn new(provider: Arc<dyn SnapshotProvider>, assets: AssetBundle) -> Self {
        Self {
            provider,
            assets: Arc::new(assets),
        }
    }
}

async fn serve_asset(state: &AppState, name: &str) -> ServerResult<Response> {
    let asset = state.assets.get(name).await?;
    Ok(([(CONTENT_TYPE, asset.content_type)], asset.body.into_owned()).into_response())
}

/// Dashboard shell.
pub async fn dashboard_handler(State(state): State<AppState>) -> ServerResult<Response> {
    serve_asset(&state, INDEX_HTML).await
}

pub async fn app_js_handler(State(state): State<AppState>) -> ServerResult<Response> {
    serve_asset(&state, APP_JS).await
}

pub async fn app_css_handler(State(state): State<AppState>) -> ServerResult<Response> {
    serve_asset(&state, APP_CSS).await
}

/// Fresh snapshot of every entity as a pretty-printed JSON array.
pub async fn models_handler(State(state): State<AppState>) -> ServerResult<Response> {
    let snapshot = state.provider.snapshot().await?;
    let body = snapshot
        .to_json_pretty()
        .map_err(|e| ServerError::Encode(e.to_string()))?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "chordata",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found_handler() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}
