use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all inspector endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::dashboard_handler))
        .route("/app.js", get(handler::app_js_handler))
        .route("/app.css", get(handler::app_css_handler))
        .route("/api/models", get(handler::models_handler))
        .route("/api/health", get(handler::health_handler))
        .fallback(handler::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
