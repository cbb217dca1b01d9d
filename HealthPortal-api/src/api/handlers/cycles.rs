use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use health_portal_domain::entities::{CreateCycleRequest, Cycle, UpdateCycleRequest};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::entities::{DeletedResponse, ErrorResponse};

/// Most recent cycles first
#[utoipa::path(
    get,
    path = "/api/cycles",
    responses(
        (status = 200, description = "Up to 50 cycles, newest first", body = [Cycle]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state))]
pub async fn list_cycles(State(state): State<AppState>) -> Result<Json<Vec<Cycle>>, ApiError> {
    Ok(Json(state.services.cycles.list().await?))
}

/// Open a review cycle; the date defaults to today
#[utoipa::path(
    post,
    path = "/api/cycles",
    request_body = CreateCycleRequest,
    responses(
        (status = 201, description = "Cycle created", body = Cycle),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state, request))]
pub async fn create_cycle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCycleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cycle = state.services.cycles.create(request).await?;
    info!("Created cycle {} for {}", cycle.id, cycle.cycle_date);
    Ok((StatusCode::CREATED, Json(cycle)))
}

/// The latest cycle, or `null` when none exists
#[utoipa::path(
    get,
    path = "/api/cycles/latest",
    responses(
        (status = 200, description = "Latest cycle or null", body = Option<Cycle>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state))]
pub async fn get_latest_cycle(State(state): State<AppState>) -> Result<Json<Option<Cycle>>, ApiError> {
    Ok(Json(state.services.cycles.latest().await?))
}

#[utoipa::path(
    get,
    path = "/api/cycles/{id}",
    params(("id" = i64, Path, description = "Cycle ID")),
    responses(
        (status = 200, description = "Cycle found", body = Cycle),
        (status = 404, description = "Cycle not found", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state))]
pub async fn get_cycle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Cycle>, ApiError> {
    Ok(Json(state.services.cycles.get(id).await?))
}

/// Record a verdict, decisions or stage outputs
#[utoipa::path(
    put,
    path = "/api/cycles/{id}",
    params(("id" = i64, Path, description = "Cycle ID")),
    request_body = UpdateCycleRequest,
    responses(
        (status = 200, description = "Cycle updated", body = Cycle),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Cycle not found", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state, request))]
pub async fn update_cycle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCycleRequest>,
) -> Result<Json<Cycle>, ApiError> {
    Ok(Json(state.services.cycles.update(id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cycles/{id}",
    params(("id" = i64, Path, description = "Cycle ID")),
    responses(
        (status = 200, description = "Cycle deleted", body = DeletedResponse),
        (status = 404, description = "Cycle not found", body = ErrorResponse),
    ),
    tag = "cycles"
)]
#[instrument(skip(state))]
pub async fn delete_cycle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.services.cycles.delete(id).await?;
    Ok(Json(DeletedResponse {
        message: "Cycle deleted".to_string(),
    }))
}
