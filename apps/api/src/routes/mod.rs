pub mod health;
pub mod multipart;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::ai::handlers as ai;
use crate::applications::handlers as applications;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applications API
        .route(
            "/api/v1/applications",
            get(applications::handle_list).post(applications::handle_create),
        )
        .route(
            "/api/v1/applications/:id",
            put(applications::handle_update).delete(applications::handle_delete),
        )
        .route(
            "/api/v1/applications/batch-delete",
            post(applications::handle_batch_delete),
        )
        .route(
            "/api/v1/applications/import",
            post(applications::handle_import),
        )
        .route(
            "/api/v1/applications/export",
            get(applications::handle_export),
        )
        // Dashboard API
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        // AI API
        .route("/api/v1/ai/tailor-cv", post(ai::handle_tailor_cv))
        .route("/api/v1/ai/cv-upload", post(ai::handle_cv_upload))
        .route(
            "/api/v1/ai/visualization-suggestions",
            post(ai::handle_visualization_suggestions),
        )
        .route("/api/v1/ai/prompt", post(ai::handle_simple_prompt))
        .with_state(state)
}
