use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use health_portal_data::models::NewLabResult;
use health_portal_data::repository::LabResultRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{
    CreateLabResultRequest, ImportLabsRequest, ImportLabsResponse, LabResult, LabTrend,
    LabTrendPoint, UpdateLabResultRequest,
};

#[derive(Clone)]
pub struct LabService {
    repository: Arc<dyn LabResultRepositoryTrait>,
}

impl LabService {
    pub fn new(repository: Arc<dyn LabResultRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Lab result with ID {} not found", id))
    }

    pub async fn list(&self, category: Option<String>) -> ServiceResult<Vec<LabResult>> {
        let rows = self.repository.list(category).await?;
        Ok(rows
            .into_iter()
            .map(conversions::convert_to_domain_lab_result)
            .collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<LabResult> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_lab_result)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, request: CreateLabResultRequest) -> ServiceResult<LabResult> {
        validate_request(&request)?;
        let row = self
            .repository
            .create(conversions::convert_to_data_new_lab_result(request))
            .await?;
        Ok(conversions::convert_to_domain_lab_result(row))
    }

    pub async fn update(&self, id: i64, request: UpdateLabResultRequest) -> ServiceResult<LabResult> {
        validate_request(&request)?;
        self.repository
            .update(id, conversions::convert_to_data_lab_result_changes(request))
            .await?
            .map(conversions::convert_to_domain_lab_result)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    /// All results for one marker, newest first
    pub async fn by_marker(&self, marker_name: String) -> ServiceResult<Vec<LabResult>> {
        let rows = self.repository.list_by_marker(marker_name).await?;
        Ok(rows
            .into_iter()
            .map(conversions::convert_to_domain_lab_result)
            .collect())
    }

    /// One trend per marker that has values, points oldest first. The unit is
    /// taken from the marker's oldest result.
    pub async fn trends(&self) -> ServiceResult<Vec<LabTrend>> {
        let rows = self.repository.list_with_values().await?;

        let mut trends: IndexMap<String, LabTrend> = IndexMap::new();
        for row in rows {
            let Some(value) = row.value else {
                continue;
            };
            let trend = trends
                .entry(row.marker_name.clone())
                .or_insert_with(|| LabTrend {
                    marker_name: row.marker_name.clone(),
                    unit: row.unit.clone().unwrap_or_default(),
                    data_points: Vec::new(),
                });
            trend.data_points.push(LabTrendPoint {
                date: row.test_date,
                value,
            });
        }

        debug!("Computed trends for {} markers", trends.len());
        Ok(trends.into_values().collect())
    }

    /// Store parsed markers; entries without a name or a value are skipped
    pub async fn import(&self, request: ImportLabsRequest) -> ServiceResult<ImportLabsResponse> {
        validate_request(&request)?;

        let total = request.markers.len();
        let lab_name = request
            .lab_name
            .filter(|name| !name.trim().is_empty());

        let batch: Vec<NewLabResult> = request
            .markers
            .into_iter()
            .filter_map(|marker| {
                let marker_name = marker
                    .marker_name
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())?;
                let value = marker.value?;
                Some(NewLabResult {
                    test_date: request.test_date,
                    lab_name: lab_name.clone(),
                    marker_name,
                    value: Some(value),
                    unit: marker.unit,
                    reference_min: marker.reference_min,
                    reference_max: marker.reference_max,
                    category: marker.category,
                    notes: None,
                })
            })
            .collect();

        let imported = if batch.is_empty() {
            0
        } else {
            self.repository.create_many(batch).await?
        };

        info!("Imported {} of {} lab markers", imported, total);
        Ok(ImportLabsResponse { imported, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ParsedMarker;
    use chrono::NaiveDate;
    use health_portal_data::database::DatabasePool;
    use health_portal_data::repository::LabResultRepository;

    fn service() -> LabService {
        LabService::new(Arc::new(LabResultRepository::new(DatabasePool::in_memory().unwrap())))
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn marker(name: Option<&str>, value: Option<f64>, unit: &str) -> ParsedMarker {
        ParsedMarker {
            marker_name: name.map(str::to_string),
            value,
            unit: Some(unit.to_string()),
            reference_min: None,
            reference_max: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_import_skips_incomplete_markers() {
        let service = service();
        let response = service
            .import(ImportLabsRequest {
                lab_name: Some("Invitro".to_string()),
                test_date: date(3, 1),
                markers: vec![
                    marker(Some("TSH"), Some(2.1), "mIU/L"),
                    marker(Some("Ferritin"), None, "ng/mL"),
                    marker(None, Some(5.0), "mmol/L"),
                    marker(Some("  "), Some(5.0), "mmol/L"),
                ],
            })
            .await
            .unwrap();

        assert_eq!(response, ImportLabsResponse { imported: 1, total: 4 });
        let stored = service.list(None).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].lab_name.as_deref(), Some("Invitro"));
        assert_eq!(stored[0].test_date, date(3, 1));
    }

    #[tokio::test]
    async fn test_trends_group_by_marker_in_date_order() {
        let service = service();
        for (d, value, unit) in [(date(3, 1), 2.4, "mIU/L"), (date(1, 1), 3.1, "uIU/mL")] {
            service
                .import(ImportLabsRequest {
                    lab_name: None,
                    test_date: d,
                    markers: vec![marker(Some("TSH"), Some(value), unit)],
                })
                .await
                .unwrap();
        }
        service
            .import(ImportLabsRequest {
                lab_name: None,
                test_date: date(2, 1),
                markers: vec![marker(Some("Ferritin"), Some(80.0), "ng/mL")],
            })
            .await
            .unwrap();

        let trends = service.trends().await.unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].marker_name, "Ferritin");
        let tsh = &trends[1];
        assert_eq!(tsh.unit, "uIU/mL");
        assert_eq!(
            tsh.data_points,
            vec![
                LabTrendPoint { date: date(1, 1), value: 3.1 },
                LabTrendPoint { date: date(3, 1), value: 2.4 },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_result_is_not_found() {
        let service = service();
        assert!(matches!(service.get(9).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.delete(9).await, Err(ServiceError::NotFound(_))));
    }
}
