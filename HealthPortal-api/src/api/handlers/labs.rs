use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use health_portal_domain::entities::{
    CreateLabResultRequest, ImportLabsRequest, ImportLabsResponse, LabResult, LabTrend,
    UpdateLabResultRequest,
};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, LabListQuery};

/// List lab results, newest test date first
#[utoipa::path(
    get,
    path = "/api/labs",
    params(LabListQuery),
    responses(
        (status = 200, description = "Lab results", body = [LabResult]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state))]
pub async fn list_labs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LabListQuery>,
) -> Result<Json<Vec<LabResult>>, ApiError> {
    Ok(Json(state.services.labs.list(query.category).await?))
}

#[utoipa::path(
    post,
    path = "/api/labs",
    request_body = CreateLabResultRequest,
    responses(
        (status = 201, description = "Lab result recorded", body = LabResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state, request))]
pub async fn create_lab(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateLabResultRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.services.labs.create(request).await?;
    info!("Recorded lab result {} ({})", result.id, result.marker_name);
    Ok((StatusCode::CREATED, Json(result)))
}

/// Store markers produced by one of the lab parsers
#[utoipa::path(
    post,
    path = "/api/labs/import",
    request_body = ImportLabsRequest,
    responses(
        (status = 200, description = "Markers imported; entries without a name or value are skipped", body = ImportLabsResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state, request))]
pub async fn import_labs(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ImportLabsRequest>,
) -> Result<Json<ImportLabsResponse>, ApiError> {
    Ok(Json(state.services.labs.import(request).await?))
}

/// Values of every marker over time
#[utoipa::path(
    get,
    path = "/api/labs/trends",
    responses(
        (status = 200, description = "One trend per marker, oldest point first", body = [LabTrend]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state))]
pub async fn get_trends(State(state): State<AppState>) -> Result<Json<Vec<LabTrend>>, ApiError> {
    Ok(Json(state.services.labs.trends().await?))
}

/// History of a single marker, newest first
#[utoipa::path(
    get,
    path = "/api/labs/marker/{name}",
    params(("name" = String, Path, description = "Marker name, e.g. TSH")),
    responses(
        (status = 200, description = "Results for the marker", body = [LabResult]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state))]
pub async fn get_by_marker(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<Vec<LabResult>>, ApiError> {
    Ok(Json(state.services.labs.by_marker(name).await?))
}

#[utoipa::path(
    get,
    path = "/api/labs/{id}",
    params(("id" = i64, Path, description = "Lab result ID")),
    responses(
        (status = 200, description = "Lab result found", body = LabResult),
        (status = 404, description = "Lab result not found", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state))]
pub async fn get_lab(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<LabResult>, ApiError> {
    Ok(Json(state.services.labs.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/labs/{id}",
    params(("id" = i64, Path, description = "Lab result ID")),
    request_body = UpdateLabResultRequest,
    responses(
        (status = 200, description = "Lab result updated", body = LabResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Lab result not found", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state, request))]
pub async fn update_lab(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateLabResultRequest>,
) -> Result<Json<LabResult>, ApiError> {
    Ok(Json(state.services.labs.update(id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/labs/{id}",
    params(("id" = i64, Path, description = "Lab result ID")),
    responses(
        (status = 204, description = "Lab result deleted"),
        (status = 404, description = "Lab result not found", body = ErrorResponse),
    ),
    tag = "labs"
)]
#[instrument(skip(state))]
pub async fn delete_lab(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.labs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
