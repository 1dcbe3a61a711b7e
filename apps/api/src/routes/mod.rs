pub mod documents;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/upload", post(documents::handle_upload))
        .route("/api/v1/cv/retarget", post(documents::handle_retarget))
        .route("/api/v1/cv/current", get(documents::handle_current))
        .route("/api/v1/cv/export", get(documents::handle_export))
        .with_state(state)
}
