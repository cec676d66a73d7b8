pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/career-guidance",
            post(handlers::handle_career_request),
        )
        // Legacy form-client path
        .route(
            "/process_career_request",
            post(handlers::handle_career_request),
        )
        .route(
            "/process_career_request/",
            post(handlers::handle_career_request),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
