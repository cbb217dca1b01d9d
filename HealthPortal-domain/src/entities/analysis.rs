use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for running an analysis
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AnalysisRequest {
    /// Cycle to read input from and store results into
    pub cycle_id: Option<i64>,
    /// `full` (default) or a single role such as `red_team`
    pub role: Option<String>,
    /// Raw input; strings are sent verbatim, other JSON is pretty-printed
    #[schema(value_type = Option<Object>)]
    pub input_data: Option<Value>,
}

impl AnalysisRequest {
    /// Whether the request asks for the whole staged pipeline
    pub fn is_full_cycle(&self) -> bool {
        match self.role.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(role) => role.eq_ignore_ascii_case("full"),
        }
    }
}

/// Output of one pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    pub role: String,
    pub content: String,
    pub model: String,
    /// Input plus output tokens; zero for stored results
    pub tokens: u32,
}

/// Stage outputs keyed by role, in pipeline order
pub type AnalysisResults = IndexMap<String, AnalysisResponse>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<i64>,
    #[schema(value_type = Object)]
    pub results: AnalysisResults,
    pub created_at: DateTime<Utc>,
}

/// A marker extracted from lab text by either parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParsedMarker {
    #[serde(default)]
    pub marker_name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_min: Option<f64>,
    #[serde(default)]
    pub reference_max: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Pasted lab report text
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ParseLabsRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    #[serde(default)]
    pub lab_name: Option<String>,
    #[serde(default)]
    pub test_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParseLabsResponse {
    pub lab_name: String,
    pub test_date: String,
    pub markers: Vec<ParsedMarker>,
    /// Plausibility warnings for the extracted values
    pub warnings: Vec<String>,
    /// Model reply, present only when it could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_detection() {
        let mut request = AnalysisRequest::default();
        assert!(request.is_full_cycle());

        request.role = Some("full".to_string());
        assert!(request.is_full_cycle());

        request.role = Some("  ".to_string());
        assert!(request.is_full_cycle());

        request.role = Some("red_team".to_string());
        assert!(!request.is_full_cycle());
    }

    #[test]
    fn test_parsed_marker_tolerates_nulls_and_missing_fields() {
        let markers: Vec<ParsedMarker> = serde_json::from_str(
            r#"[{"marker_name": "TSH", "value": 2.1, "unit": null}, {"value": 5}]"#,
        )
        .unwrap();
        assert_eq!(markers[0].marker_name.as_deref(), Some("TSH"));
        assert!(markers[0].unit.is_none());
        assert!(markers[1].marker_name.is_none());
        assert_eq!(markers[1].value, Some(5.0));
    }
}
