use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Error response format for API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Confirmation body for deletes that answer with content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

/// Filters for listing supplements
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplementListQuery {
    /// `active`, `paused` or `removed`
    pub status: Option<String>,
    pub category: Option<String>,
}

/// Filters for listing lab results
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LabListQuery {
    pub category: Option<String>,
}

/// Filters for listing interactions
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InteractionListQuery {
    /// `critical`, `warning` or `synergy`
    #[serde(rename = "type")]
    pub interaction_type: Option<String>,
}

/// Filters for listing reminders
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReminderListQuery {
    /// Only active reminders when `true`
    pub active: Option<String>,
}

impl ReminderListQuery {
    pub fn active_only(&self) -> bool {
        self.active
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }
}

/// Multipart body of the PDF upload
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ParsePdfForm {
    /// The lab report PDF
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub lab_name: Option<String>,
    /// `YYYY-MM-DD`
    pub test_date: Option<String>,
}
