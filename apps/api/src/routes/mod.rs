pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::reports::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/health", get(health::health_handler))
        // Analysis
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/analyze/text", post(analysis::handle_analyze_text))
        // Reports
        .route("/api/report/:id/json", get(reports::handle_json_report))
        .route("/api/report/:id/markdown", get(reports::handle_markdown_report))
        .route("/api/report/:id/pdf", get(reports::handle_pdf_report))
        // Admin
        .route("/api/admin/weights", get(analysis::handle_default_weights))
        .route("/api/admin/settings", post(analysis::handle_save_settings))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
