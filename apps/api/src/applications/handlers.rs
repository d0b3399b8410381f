use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::applications::validation::{validate_application, validate_draft};
use crate::auth::UserContext;
use crate::dashboard::commands::{execute, Command, Transition};
use crate::dashboard::export::ExportFormat;
use crate::dashboard::notices::Notice;
use crate::errors::AppError;
use crate::models::application::{ApplicationInput, JobApplication};
use crate::routes::multipart::read_file_field;
use crate::state::AppState;

/// Body of every mutation response: the client applies `transition` to its
/// own list and shows `notice`.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub transition: Transition,
    pub notice: Notice,
}

#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

async fn run(
    state: &AppState,
    ctx: &UserContext,
    command: Command,
) -> Result<Json<MutationResponse>, AppError> {
    let action = command.action();
    let transition = execute(command, state.store.as_ref(), ctx)
        .await
        .map_err(|e| {
            error!("{action:?} for user {} failed: {e}", ctx.user_id);
            AppError::from(e).with_notice(Notice::failure(action))
        })?;
    let notice = Notice::success(&transition);
    Ok(Json(MutationResponse { transition, notice }))
}

/// GET /api/v1/applications
pub async fn handle_list(
    State(state): State<AppState>,
    ctx: UserContext,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.store.list(&ctx).await?))
}

/// POST /api/v1/applications
pub async fn handle_create(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<MutationResponse>, AppError> {
    let draft = validate_draft(&input)?;
    run(&state, &ctx, Command::Add(draft)).await
}

/// PUT /api/v1/applications/:id
pub async fn handle_update(
    State(state): State<AppState>,
    ctx: UserContext,
    Path(id): Path<String>,
    Json(mut input): Json<ApplicationInput>,
) -> Result<Json<MutationResponse>, AppError> {
    // Path and token are authoritative for identity.
    input.id = Some(id);
    input.user_id = Some(ctx.user_id.clone());
    let application = validate_application(&input)?;
    run(&state, &ctx, Command::Update(application)).await
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    ctx: UserContext,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, AppError> {
    run(&state, &ctx, Command::Delete(id)).await
}

/// POST /api/v1/applications/batch-delete
pub async fn handle_batch_delete(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(req): Json<BatchDeleteRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::BadRequest("No applications selected.".to_string()));
    }
    run(&state, &ctx, Command::DeleteMany(req.ids)).await
}

/// POST /api/v1/applications/import
pub async fn handle_import(
    State(state): State<AppState>,
    ctx: UserContext,
    multipart: Multipart,
) -> Result<Json<MutationResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    info!(
        "Importing {} bytes from {:?} for user {}",
        file.bytes.len(),
        file.file_name,
        ctx.user_id
    );
    run(&state, &ctx, Command::Import(file.bytes.to_vec())).await
}

/// GET /api/v1/applications/export
pub async fn handle_export(
    State(state): State<AppState>,
    ctx: UserContext,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let apps = state.store.list(&ctx).await?;
    let body = query.format.render(&apps).map_err(anyhow::Error::from)?;
    let disposition = format!("attachment; filename=\"{}\"", query.format.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, query.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
