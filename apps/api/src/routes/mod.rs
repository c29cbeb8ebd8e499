pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parsing::handlers as parsing;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Parsing API
        .route("/api/v1/resumes/parse", post(parsing::handle_parse_upload))
        .route("/api/v1/resumes/extract", post(parsing::handle_extract))
        .route("/api/v1/resumes/sections", post(parsing::handle_sections))
        // Screening API (requires a configured model)
        .route(
            "/api/v1/jobs/description",
            post(screening::handle_job_description),
        )
        .route("/api/v1/resumes/score", post(screening::handle_score))
        .route(
            "/api/v1/interviews/questions",
            post(screening::handle_interview_questions),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
