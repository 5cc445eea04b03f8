pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/parse",
            post(extraction::handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/resumes/analyze",
            post(analysis::handlers::handle_analyze_resume),
        )
        .with_state(state)
}
