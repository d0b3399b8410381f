use axum::extract::{Multipart, State};
use axum::Json;

use crate::ai::simple_prompt::{simple_prompt, SimplePromptInput, SimplePromptOutput};
use crate::ai::tailor_cv::{tailor_cv, TailorCvInput, TailorCvOutput};
use crate::ai::upload::{upload_cv_text, UploadedCv};
use crate::ai::visualization::{suggest_visualizations, VisualizationInput, VisualizationOutput};
use crate::auth::UserContext;
use crate::errors::AppError;
use crate::routes::multipart::read_file_field;
use crate::state::AppState;

/// POST /api/v1/ai/tailor-cv
pub async fn handle_tailor_cv(
    State(state): State<AppState>,
    _ctx: UserContext,
    Json(req): Json<TailorCvInput>,
) -> Result<Json<TailorCvOutput>, AppError> {
    Ok(Json(tailor_cv(&req, state.llm.as_ref()).await?))
}

/// POST /api/v1/ai/cv-upload
pub async fn handle_cv_upload(
    _ctx: UserContext,
    multipart: Multipart,
) -> Result<Json<UploadedCv>, AppError> {
    let file = read_file_field(multipart).await?;
    let cv = upload_cv_text(
        file.file_name.as_deref(),
        file.content_type.as_deref(),
        &file.bytes,
    )?;
    Ok(Json(cv))
}

/// POST /api/v1/ai/visualization-suggestions
pub async fn handle_visualization_suggestions(
    State(state): State<AppState>,
    _ctx: UserContext,
    Json(req): Json<VisualizationInput>,
) -> Result<Json<VisualizationOutput>, AppError> {
    Ok(Json(suggest_visualizations(&req, state.llm.as_ref()).await?))
}

/// POST /api/v1/ai/prompt
pub async fn handle_simple_prompt(
    State(state): State<AppState>,
    _ctx: UserContext,
    Json(req): Json<SimplePromptInput>,
) -> Result<Json<SimplePromptOutput>, AppError> {
    Ok(Json(simple_prompt(&req, state.llm.as_ref()).await?))
}
