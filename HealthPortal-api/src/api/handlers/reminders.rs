use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use health_portal_domain::entities::{CreateReminderRequest, Reminder, UpdateReminderRequest};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, ReminderListQuery};

/// List reminders ordered by time
#[utoipa::path(
    get,
    path = "/api/reminders",
    params(ReminderListQuery),
    responses(
        (status = 200, description = "Reminders", body = [Reminder]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReminderListQuery>,
) -> Result<Json<Vec<Reminder>>, ApiError> {
    Ok(Json(state.services.reminders.list(query.active_only()).await?))
}

#[utoipa::path(
    post,
    path = "/api/reminders",
    request_body = CreateReminderRequest,
    responses(
        (status = 201, description = "Reminder created", body = Reminder),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state, request))]
pub async fn create_reminder(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateReminderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = state.services.reminders.create(request).await?;
    info!("Created reminder {} ({})", reminder.id, reminder.title);
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Active reminders due today
#[utoipa::path(
    get,
    path = "/api/reminders/today",
    responses(
        (status = 200, description = "Reminders whose days include today's weekday", body = [Reminder]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn get_today(State(state): State<AppState>) -> Result<Json<Vec<Reminder>>, ApiError> {
    Ok(Json(state.services.reminders.today().await?))
}

#[utoipa::path(
    get,
    path = "/api/reminders/{id}",
    params(("id" = i64, Path, description = "Reminder ID")),
    responses(
        (status = 200, description = "Reminder found", body = Reminder),
        (status = 404, description = "Reminder not found", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn get_reminder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Reminder>, ApiError> {
    Ok(Json(state.services.reminders.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/reminders/{id}",
    params(("id" = i64, Path, description = "Reminder ID")),
    request_body = UpdateReminderRequest,
    responses(
        (status = 200, description = "Reminder updated", body = Reminder),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Reminder not found", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state, request))]
pub async fn update_reminder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateReminderRequest>,
) -> Result<Json<Reminder>, ApiError> {
    Ok(Json(state.services.reminders.update(id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    params(("id" = i64, Path, description = "Reminder ID")),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 404, description = "Reminder not found", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn delete_reminder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.reminders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a reminder between active and inactive
#[utoipa::path(
    post,
    path = "/api/reminders/{id}/toggle",
    params(("id" = i64, Path, description = "Reminder ID")),
    responses(
        (status = 200, description = "Reminder with its new state", body = Reminder),
        (status = 404, description = "Reminder not found", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn toggle_reminder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Reminder>, ApiError> {
    Ok(Json(state.services.reminders.toggle(id).await?))
}
