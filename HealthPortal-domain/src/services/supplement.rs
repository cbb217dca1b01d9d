use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use health_portal_data::models::SupplementFilter;
use health_portal_data::repository::SupplementRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{
    CreateSupplementRequest, ScheduleSlot, Supplement, SupplementsByCategory,
    UpdateSupplementRequest,
};

/// Category label for supplements without one
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Clone)]
pub struct SupplementService {
    repository: Arc<dyn SupplementRepositoryTrait>,
}

impl SupplementService {
    pub fn new(repository: Arc<dyn SupplementRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Supplement with ID {} not found", id))
    }

    pub async fn list(
        &self,
        status: Option<String>,
        category: Option<String>,
    ) -> ServiceResult<Vec<Supplement>> {
        let rows = self
            .repository
            .list(SupplementFilter { status, category })
            .await?;
        Ok(rows
            .into_iter()
            .map(conversions::convert_to_domain_supplement)
            .collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Supplement> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_supplement)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, request: CreateSupplementRequest) -> ServiceResult<Supplement> {
        validate_request(&request)?;

        let row = self
            .repository
            .create(conversions::convert_to_data_new_supplement(request))
            .await?;
        info!("Created supplement {} ({})", row.id, row.name);
        Ok(conversions::convert_to_domain_supplement(row))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateSupplementRequest,
    ) -> ServiceResult<Supplement> {
        validate_request(&request)?;

        self.repository
            .update(id, conversions::convert_to_data_supplement_changes(request))
            .await?
            .map(conversions::convert_to_domain_supplement)
            .ok_or_else(|| Self::not_found(id))
    }

    /// Soft delete: the row stays with status `removed`
    pub async fn remove(&self, id: i64) -> ServiceResult<()> {
        if self.repository.soft_delete(id).await? {
            info!("Removed supplement {}", id);
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    /// Active supplements grouped by time slot, slots in time order
    pub async fn schedule(&self) -> ServiceResult<Vec<ScheduleSlot>> {
        let rows = self.repository.list_scheduled().await?;

        let mut slots: IndexMap<String, Vec<Supplement>> = IndexMap::new();
        for row in rows {
            let Some(time_of_day) = row.time_of_day.clone() else {
                continue;
            };
            slots
                .entry(time_of_day)
                .or_default()
                .push(conversions::convert_to_domain_supplement(row));
        }

        debug!("Built schedule with {} slots", slots.len());
        Ok(slots
            .into_iter()
            .map(|(time_of_day, supplements)| ScheduleSlot {
                time_of_day,
                supplements,
            })
            .collect())
    }

    /// Active supplements grouped by category
    pub async fn by_category(&self) -> ServiceResult<SupplementsByCategory> {
        let rows = self.repository.list_active().await?;

        let mut groups = SupplementsByCategory::new();
        for row in rows {
            let category = row
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            groups
                .entry(category)
                .or_default()
                .push(conversions::convert_to_domain_supplement(row));
        }
        Ok(groups)
    }
}
