use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::UserContext;
use crate::dashboard::views::DashboardSummary;
use crate::dashboard::Dashboard;
use crate::errors::AppError;
use crate::models::application::{JobApplication, Status};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Status tab; omitted or `all` shows every record.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub applications: Vec<JobApplication>,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    ctx: UserContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let filter = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(
            s.parse::<Status>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
    };

    let dashboard = Dashboard::seed(state.store.as_ref(), &ctx).await?;
    Ok(Json(DashboardResponse {
        summary: dashboard.summary(Utc::now().date_naive()),
        applications: dashboard.table(filter),
    }))
}
