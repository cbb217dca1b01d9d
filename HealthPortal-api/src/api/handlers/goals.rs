use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use health_portal_domain::entities::{CreateGoalRequest, Goal, UpdateGoalRequest};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::entities::ErrorResponse;

/// List goals by priority, then name
#[utoipa::path(
    get,
    path = "/api/goals",
    responses(
        (status = 200, description = "All goals", body = [Goal]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "goals"
)]
#[instrument(skip(state))]
pub async fn list_goals(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(state.services.goals.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = CreateGoalRequest,
    responses(
        (status = 201, description = "Goal created", body = Goal),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "goals"
)]
#[instrument(skip(state, request))]
pub async fn create_goal(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.services.goals.create(request).await?;
    info!("Created goal {}", goal.id);
    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    params(("id" = i64, Path, description = "Goal ID")),
    responses(
        (status = 200, description = "Goal found", body = Goal),
        (status = 404, description = "Goal not found", body = ErrorResponse),
    ),
    tag = "goals"
)]
#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.services.goals.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/goals/{id}",
    params(("id" = i64, Path, description = "Goal ID")),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Goal updated", body = Goal),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Goal not found", body = ErrorResponse),
    ),
    tag = "goals"
)]
#[instrument(skip(state, request))]
pub async fn update_goal(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateGoalRequest>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.services.goals.update(id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    params(("id" = i64, Path, description = "Goal ID")),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 404, description = "Goal not found", body = ErrorResponse),
    ),
    tag = "goals"
)]
#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.goals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
