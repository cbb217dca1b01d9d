use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::analysis::ParsedMarker;
use super::dates::{deserialize_date, deserialize_optional_date};

/// A single lab marker measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabResult {
    pub id: i64,
    pub user_id: i64,
    pub test_date: NaiveDate,
    pub lab_name: Option<String>,
    /// Normalized marker name, e.g. "Testosterone Total"
    pub marker_name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for recording a lab result
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_reference_range"))]
pub struct CreateLabResultRequest {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(deserialize_with = "deserialize_date")]
    pub test_date: NaiveDate,
    pub lab_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Marker name must be between 1 and 200 characters"))]
    pub marker_name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Request payload for a partial lab result update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_reference_range"))]
pub struct UpdateLabResultRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub test_date: Option<NaiveDate>,
    pub lab_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Marker name must be between 1 and 200 characters"))]
    pub marker_name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

fn check_reference_range(min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            let mut error = ValidationError::new("reference_range");
            error.message = Some("reference_min must not exceed reference_max".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

fn validate_create_reference_range(request: &CreateLabResultRequest) -> Result<(), ValidationError> {
    check_reference_range(request.reference_min, request.reference_max)
}

fn validate_update_reference_range(request: &UpdateLabResultRequest) -> Result<(), ValidationError> {
    check_reference_range(request.reference_min, request.reference_max)
}

/// One dated value of a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabTrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// All recorded values of one marker, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabTrend {
    pub marker_name: String,
    /// Unit of the earliest measurement
    pub unit: String,
    pub data_points: Vec<LabTrendPoint>,
}

/// Bulk import of markers produced by one of the lab parsers
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImportLabsRequest {
    pub lab_name: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub test_date: NaiveDate,
    #[validate(length(max = 500, message = "At most 500 markers can be imported at once"))]
    pub markers: Vec<ParsedMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportLabsResponse {
    /// Markers written to the database
    pub imported: usize,
    /// Markers received
    pub total: usize,
}
