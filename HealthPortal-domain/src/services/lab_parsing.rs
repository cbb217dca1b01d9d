use tracing::{debug, info};

use super::{validate_request, ServiceResult};
use crate::ai::AnalysisPipeline;
use crate::entities::{ParseLabsRequest, ParseLabsResponse};
use crate::labs::{extract_text_from_pdf, parse_lab_text, validate_markers, LabParseError};

/// Turns pasted text or uploaded PDFs into lab markers, with the model when
/// one is configured and the rule-based parser otherwise
#[derive(Clone)]
pub struct LabParsingService {
    pipeline: Option<AnalysisPipeline>,
}

impl LabParsingService {
    pub fn new(pipeline: Option<AnalysisPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn parse_text(&self, request: ParseLabsRequest) -> ServiceResult<ParseLabsResponse> {
        validate_request(&request)?;
        if request.text.trim().is_empty() {
            return Err(LabParseError::EmptyInput.into());
        }

        self.parse(
            &request.text,
            request.lab_name.unwrap_or_default(),
            request.test_date.unwrap_or_default(),
        )
        .await
    }

    pub async fn parse_pdf(
        &self,
        data: &[u8],
        lab_name: Option<String>,
        test_date: Option<String>,
    ) -> ServiceResult<ParseLabsResponse> {
        let text = extract_text_from_pdf(data);
        if text.trim().is_empty() {
            return Err(LabParseError::NoExtractableText.into());
        }
        debug!("Extracted {} characters from a {} byte PDF", text.len(), data.len());

        self.parse(&text, lab_name.unwrap_or_default(), test_date.unwrap_or_default())
            .await
    }

    async fn parse(
        &self,
        text: &str,
        lab_name: String,
        test_date: String,
    ) -> ServiceResult<ParseLabsResponse> {
        let (markers, raw_text) = match &self.pipeline {
            Some(pipeline) => {
                let reply = pipeline.parse_lab_text(text).await?;
                (reply.markers, reply.raw_text)
            }
            None => (parse_lab_text(text, &lab_name, &test_date).markers, None),
        };

        let warnings = validate_markers(&markers);
        info!(
            "Parsed {} lab markers ({} warnings)",
            markers.len(),
            warnings.len()
        );

        Ok(ParseLabsResponse {
            lab_name,
            test_date,
            markers,
            warnings,
            raw_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Completion, MockCompletionClient};
    use crate::services::ServiceError;
    use std::sync::Arc;

    fn text_request(text: &str) -> ParseLabsRequest {
        ParseLabsRequest {
            text: text.to_string(),
            lab_name: Some("Helix".to_string()),
            test_date: Some("2024-06-01".to_string()),
        }
    }

    #[tokio::test]
    async fn test_rule_parser_without_pipeline() {
        let service = LabParsingService::new(None);
        let response = service
            .parse_text(text_request("ТТГ 250 мМЕ/л 0,4-4,0\nФерритин 85 нг/мл 30-400"))
            .await
            .unwrap();

        assert_eq!(response.lab_name, "Helix");
        assert_eq!(response.test_date, "2024-06-01");
        assert_eq!(response.markers.len(), 2);
        assert_eq!(response.warnings, vec!["TSH: value 250.00 seems out of range"]);
        assert!(response.raw_text.is_none());
    }

    #[tokio::test]
    async fn test_model_reply_without_array_keeps_raw_text() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().returning(|_, _| {
            Ok(Completion {
                text: "No markers found".to_string(),
                model: "test-model".to_string(),
                tokens: 3,
            })
        });
        let service = LabParsingService::new(Some(AnalysisPipeline::new(Arc::new(client), 256)));

        let response = service.parse_text(text_request("illegible")).await.unwrap();
        assert!(response.markers.is_empty());
        assert_eq!(response.raw_text.as_deref(), Some("No markers found"));
    }

    #[tokio::test]
    async fn test_blank_text_and_empty_pdf_are_rejected() {
        let service = LabParsingService::new(None);
        assert!(matches!(
            service.parse_text(text_request("   ")).await,
            Err(ServiceError::Validation(_))
        ));

        let err = service.parse_pdf(b"%PDF-1.7", None, None).await.unwrap_err();
        assert!(err.to_string().contains("Could not extract text from PDF"));
    }

    #[tokio::test]
    async fn test_pdf_goes_through_rule_parser() {
        let service = LabParsingService::new(None);
        let response = service
            .parse_pdf(b"BT (Glucose 5,2 mmol/L 3,9-6,1) Tj ET", None, None)
            .await
            .unwrap();
        assert_eq!(response.markers.len(), 1);
        assert_eq!(response.markers[0].value, Some(5.2));
        assert_eq!(response.markers[0].reference_max, Some(6.1));
        assert_eq!(response.lab_name, "");
    }

    #[tokio::test]
    async fn test_pdf_rows_in_separate_text_objects() {
        let service = LabParsingService::new(None);
        let pdf = b"%PDF-1.4\nBT (TSH 2,1 mIU/L 0,4-4,0) Tj ET\nBT (Glucose 5,2 mmol/L 3,9-6,1) Tj ET\nBT (HbA1c 5,4 %) Tj ET";
        let response = service.parse_pdf(pdf, None, None).await.unwrap();

        let markers: Vec<_> = response
            .markers
            .iter()
            .map(|m| (m.marker_name.as_deref().unwrap_or_default(), m.value))
            .collect();
        assert_eq!(
            markers,
            vec![("TSH", Some(2.1)), ("Glucose", Some(5.2)), ("HbA1c", Some(5.4))]
        );
        assert_eq!(response.markers[0].reference_max, Some(4.0));
        assert!(response.warnings.is_empty());
    }
}
