pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/ats/evaluate", post(handlers::handle_evaluate))
        .route("/api/v1/ats/rank", post(handlers::handle_rank))
        .route("/api/v1/ats/config", get(handlers::handle_get_config))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
