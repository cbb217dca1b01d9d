use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info, instrument};

use health_portal_domain::entities::{
    AnalysisRequest, AnalyzeResponse, ParseLabsRequest, ParseLabsResponse,
};

use crate::api::error::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::entities::{ErrorResponse, ParsePdfForm};

/// Largest accepted PDF upload
pub const MAX_PDF_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Run the full analysis cycle or a single role
#[utoipa::path(
    post,
    path = "/api/ai/analyze",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Stage outputs keyed by role", body = AnalyzeResponse),
        (status = 400, description = "No input data", body = ErrorResponse),
        (status = 404, description = "Cycle not found", body = ErrorResponse),
        (status = 500, description = "AI analysis failed or is not configured", body = ErrorResponse),
    ),
    tag = "ai"
)]
#[instrument(skip(state, request))]
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let response = state.services.analysis.analyze(request).await?;
    info!("Analysis finished with {} stage(s)", response.results.len());
    Ok(Json(response))
}

/// Stage outputs stored on a cycle
#[utoipa::path(
    get,
    path = "/api/ai/analysis/{cycle_id}",
    params(("cycle_id" = i64, Path, description = "Cycle ID")),
    responses(
        (status = 200, description = "Stored stage outputs", body = AnalyzeResponse),
        (status = 404, description = "Cycle not found", body = ErrorResponse),
    ),
    tag = "ai"
)]
#[instrument(skip(state))]
pub async fn get_analysis(
    State(state): State<AppState>,
    ApiPath(cycle_id): ApiPath<i64>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    Ok(Json(state.services.analysis.get_analysis(cycle_id).await?))
}

/// Extract markers from pasted lab report text
#[utoipa::path(
    post,
    path = "/api/ai/parse-labs",
    request_body = ParseLabsRequest,
    responses(
        (status = 200, description = "Extracted markers with plausibility warnings", body = ParseLabsResponse),
        (status = 400, description = "Text is required", body = ErrorResponse),
        (status = 500, description = "AI parsing failed", body = ErrorResponse),
    ),
    tag = "ai"
)]
#[instrument(skip(state, request))]
pub async fn parse_labs(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ParseLabsRequest>,
) -> Result<Json<ParseLabsResponse>, ApiError> {
    Ok(Json(state.services.lab_parsing.parse_text(request).await?))
}

/// Extract markers from an uploaded lab report PDF
#[utoipa::path(
    post,
    path = "/api/ai/parse-pdf",
    request_body(content = ParsePdfForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted markers with plausibility warnings", body = ParseLabsResponse),
        (status = 400, description = "Missing file or no extractable text", body = ErrorResponse),
        (status = 413, description = "Upload exceeds 10 MiB", body = ErrorResponse),
        (status = 500, description = "AI parsing failed", body = ErrorResponse),
    ),
    tag = "ai"
)]
#[instrument(skip(state, multipart))]
pub async fn parse_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseLabsResponse>, ApiError> {
    let mut file = None;
    let mut lab_name = None;
    let mut test_date = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let data = field.bytes().await?;
                debug!("Received PDF upload of {} bytes", data.len());
                file = Some(data);
            }
            "lab_name" => lab_name = Some(field.text().await?),
            "test_date" => test_date = Some(field.text().await?),
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("Failed to read file: missing 'file' field".to_string()))?;
    let lab_name = lab_name.filter(|v| !v.trim().is_empty());
    let test_date = test_date.filter(|v| !v.trim().is_empty());

    Ok(Json(
        state
            .services
            .lab_parsing
            .parse_pdf(&file, lab_name, test_date)
            .await?,
    ))
}
