use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use health_portal_data::repository::CycleRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{CreateCycleRequest, Cycle, UpdateCycleRequest};

#[derive(Clone)]
pub struct CycleService {
    repository: Arc<dyn CycleRepositoryTrait>,
}

impl CycleService {
    pub fn new(repository: Arc<dyn CycleRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Cycle with ID {} not found", id))
    }

    /// The 50 most recent cycles
    pub async fn list(&self) -> ServiceResult<Vec<Cycle>> {
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(conversions::convert_to_domain_cycle).collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Cycle> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_cycle)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn latest(&self) -> ServiceResult<Option<Cycle>> {
        Ok(self
            .repository
            .latest()
            .await?
            .map(conversions::convert_to_domain_cycle))
    }

    /// A missing `cycle_date` means today (UTC)
    pub async fn create(&self, request: CreateCycleRequest) -> ServiceResult<Cycle> {
        validate_request(&request)?;
        let today = Utc::now().date_naive();
        let row = self
            .repository
            .create(conversions::convert_to_data_new_cycle(request, today))
            .await?;
        info!("Created cycle {} for {}", row.id, row.cycle_date);
        Ok(conversions::convert_to_domain_cycle(row))
    }

    pub async fn update(&self, id: i64, request: UpdateCycleRequest) -> ServiceResult<Cycle> {
        validate_request(&request)?;
        self.repository
            .update(id, conversions::convert_to_data_cycle_changes(request))
            .await?
            .map(conversions::convert_to_domain_cycle)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use health_portal_data::database::DatabasePool;
    use health_portal_data::repository::CycleRepository;
    use serde_json::json;

    fn service() -> CycleService {
        CycleService::new(Arc::new(CycleRepository::new(DatabasePool::in_memory().unwrap())))
    }

    #[tokio::test]
    async fn test_create_defaults_date_to_today() {
        let service = service();
        let cycle = service
            .create(CreateCycleRequest {
                input_data: Some(json!({"notes": "baseline"})),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cycle.cycle_date, Utc::now().date_naive());
        assert_eq!(cycle.input_data, Some(json!({"notes": "baseline"})));
    }

    #[tokio::test]
    async fn test_latest_and_verdict_update() {
        let service = service();
        assert!(service.latest().await.unwrap().is_none());

        let older = service
            .create(CreateCycleRequest {
                cycle_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                ..Default::default()
            })
            .await
            .unwrap();
        let newer = service
            .create(CreateCycleRequest {
                cycle_date: NaiveDate::from_ymd_opt(2024, 4, 1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(service.latest().await.unwrap().map(|c| c.id), Some(newer.id));

        let updated = service
            .update(
                older.id,
                UpdateCycleRequest {
                    verdict: Some("wait".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.verdict.as_deref(), Some("wait"));

        let err = service
            .update(
                older.id,
                UpdateCycleRequest {
                    verdict: Some("maybe".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
