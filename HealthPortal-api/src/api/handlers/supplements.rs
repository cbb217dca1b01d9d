use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use health_portal_domain::entities::{
    CreateSupplementRequest, ScheduleSlot, Supplement, UpdateSupplementRequest,
};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, SupplementListQuery};

/// List supplements, optionally filtered by status and category
#[utoipa::path(
    get,
    path = "/api/supplements",
    params(SupplementListQuery),
    responses(
        (status = 200, description = "Supplements ordered by time of day and name", body = [Supplement]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state))]
pub async fn list_supplements(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SupplementListQuery>,
) -> Result<Json<Vec<Supplement>>, ApiError> {
    let supplements = state
        .services
        .supplements
        .list(query.status, query.category)
        .await?;
    Ok(Json(supplements))
}

/// Add a supplement to the stack
#[utoipa::path(
    post,
    path = "/api/supplements",
    request_body = CreateSupplementRequest,
    responses(
        (status = 201, description = "Supplement created", body = Supplement),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state, request))]
pub async fn create_supplement(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSupplementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supplement = state.services.supplements.create(request).await?;
    info!("Created supplement {} ({})", supplement.id, supplement.name);
    Ok((StatusCode::CREATED, Json(supplement)))
}

/// Active supplements grouped by time of day
#[utoipa::path(
    get,
    path = "/api/supplements/schedule",
    responses(
        (status = 200, description = "One slot per time of day", body = [ScheduleSlot]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state))]
pub async fn get_schedule(State(state): State<AppState>) -> Result<Json<Vec<ScheduleSlot>>, ApiError> {
    Ok(Json(state.services.supplements.schedule().await?))
}

/// Active supplements grouped by category
#[utoipa::path(
    get,
    path = "/api/supplements/by-category",
    responses(
        (status = 200, description = "Category name to supplements; missing categories are `uncategorized`"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state))]
pub async fn get_by_category(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.services.supplements.by_category().await?))
}

#[utoipa::path(
    get,
    path = "/api/supplements/{id}",
    params(("id" = i64, Path, description = "Supplement ID")),
    responses(
        (status = 200, description = "Supplement found", body = Supplement),
        (status = 404, description = "Supplement not found", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state))]
pub async fn get_supplement(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Supplement>, ApiError> {
    Ok(Json(state.services.supplements.get(id).await?))
}

/// Partially update a supplement; omitted fields are kept
#[utoipa::path(
    put,
    path = "/api/supplements/{id}",
    params(("id" = i64, Path, description = "Supplement ID")),
    request_body = UpdateSupplementRequest,
    responses(
        (status = 200, description = "Supplement updated", body = Supplement),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Supplement not found", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state, request))]
pub async fn update_supplement(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateSupplementRequest>,
) -> Result<Json<Supplement>, ApiError> {
    Ok(Json(state.services.supplements.update(id, request).await?))
}

/// Mark a supplement as removed
#[utoipa::path(
    delete,
    path = "/api/supplements/{id}",
    params(("id" = i64, Path, description = "Supplement ID")),
    responses(
        (status = 204, description = "Supplement removed"),
        (status = 404, description = "Supplement not found", body = ErrorResponse),
    ),
    tag = "supplements"
)]
#[instrument(skip(state))]
pub async fn delete_supplement(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.supplements.remove(id).await?;
    info!("Removed supplement {}", id);
    Ok(StatusCode::NO_CONTENT)
}
