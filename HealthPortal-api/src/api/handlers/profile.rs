use axum::{extract::State, Json};
use tracing::instrument;

use health_portal_domain::entities::{Profile, UpdateProfileRequest};

use crate::api::error::ApiError;
use crate::api::extractors::ApiJson;
use crate::api::state::AppState;
use crate::entities::ErrorResponse;

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The user's profile", body = Profile),
        (status = 404, description = "Profile missing", body = ErrorResponse),
    ),
    tag = "profile"
)]
#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.services.profile.get().await?))
}

/// Partially update the profile; omitted fields are kept
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "profile"
)]
#[instrument(skip(state, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.services.profile.update(request).await?))
}
