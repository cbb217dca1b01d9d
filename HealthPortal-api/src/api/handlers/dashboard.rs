use axum::{extract::State, Json};
use tracing::instrument;

use health_portal_domain::entities::DashboardSummary;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::entities::ErrorResponse;

/// Counts, today's reminders, the latest cycle and out-of-range lab markers
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard aggregate", body = DashboardSummary),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(state))]
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(state.services.dashboard.summary().await?))
}
