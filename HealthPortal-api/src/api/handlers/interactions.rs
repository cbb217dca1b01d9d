use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::instrument;

use health_portal_domain::entities::{
    CreateInteractionRequest, Interaction, UpdateInteractionRequest,
};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, InteractionListQuery};

/// List interactions, most severe first
#[utoipa::path(
    get,
    path = "/api/interactions",
    params(InteractionListQuery),
    responses(
        (status = 200, description = "Interactions with both supplement names", body = [Interaction]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "interactions"
)]
#[instrument(skip(state))]
pub async fn list_interactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<InteractionListQuery>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    Ok(Json(state.services.interactions.list(query.interaction_type).await?))
}

/// Record an interaction between two supplements
#[utoipa::path(
    post,
    path = "/api/interactions",
    request_body = CreateInteractionRequest,
    responses(
        (status = 201, description = "Interaction created", body = Interaction),
        (status = 400, description = "Invalid request or unknown supplement", body = ErrorResponse),
    ),
    tag = "interactions"
)]
#[instrument(skip(state, request))]
pub async fn create_interaction(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInteractionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let interaction = state.services.interactions.create(request).await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

#[utoipa::path(
    get,
    path = "/api/interactions/{id}",
    params(("id" = i64, Path, description = "Interaction ID")),
    responses(
        (status = 200, description = "Interaction found", body = Interaction),
        (status = 404, description = "Interaction not found", body = ErrorResponse),
    ),
    tag = "interactions"
)]
#[instrument(skip(state))]
pub async fn get_interaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Interaction>, ApiError> {
    Ok(Json(state.services.interactions.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/interactions/{id}",
    params(("id" = i64, Path, description = "Interaction ID")),
    request_body = UpdateInteractionRequest,
    responses(
        (status = 200, description = "Interaction updated", body = Interaction),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Interaction not found", body = ErrorResponse),
    ),
    tag = "interactions"
)]
#[instrument(skip(state, request))]
pub async fn update_interaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateInteractionRequest>,
) -> Result<Json<Interaction>, ApiError> {
    Ok(Json(state.services.interactions.update(id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/interactions/{id}",
    params(("id" = i64, Path, description = "Interaction ID")),
    responses(
        (status = 204, description = "Interaction deleted"),
        (status = 404, description = "Interaction not found", body = ErrorResponse),
    ),
    tag = "interactions"
)]
#[instrument(skip(state))]
pub async fn delete_interaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.interactions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
