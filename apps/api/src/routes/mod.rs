pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::auth::handlers as auth;
use crate::state::AppState;

/// Largest accepted request body (résumé uploads).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/signup", post(auth::handle_signup))
        .route("/api/auth/logout", post(auth::handle_logout))
        .route("/api/auth/session", get(auth::handle_session))
        .route(
            "/api/auth/username-available",
            get(auth::handle_username_available),
        )
        // Analysis API (session required)
        .route("/api/analyze/extract-pdf", post(analysis::handle_extract_pdf))
        .route("/api/analyze/run", post(analysis::handle_analyze))
        .route("/api/analyze/download", post(analysis::handle_download_report))
        .route("/api/analyze/skill-gap", post(analysis::handle_skill_gap))
        .route(
            "/api/analyze/career-roadmap",
            post(analysis::handle_career_roadmap),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
