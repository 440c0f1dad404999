pub mod api;
pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // HR manager
        .route("/api/evaluate-cvs", post(api::handle_evaluate_cvs))
        .route("/api/upload-policies", post(api::handle_upload_policies))
        .route("/api/generate-questions", post(api::handle_generate_questions))
        .route("/api/evaluate-answers", post(api::handle_evaluate_answers))
        // Employee
        .route("/api/ask-policy", post(api::handle_ask_policy))
        .route("/api/sessions/:session_id", delete(api::handle_delete_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
