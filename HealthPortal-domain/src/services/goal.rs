use std::sync::Arc;

use tracing::info;

use health_portal_data::repository::GoalRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{CreateGoalRequest, Goal, UpdateGoalRequest};

#[derive(Clone)]
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Goal with ID {} not found", id))
    }

    /// Goals ordered critical, high, medium, background, then by name
    pub async fn list(&self) -> ServiceResult<Vec<Goal>> {
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(conversions::convert_to_domain_goal).collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Goal> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_goal)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, request: CreateGoalRequest) -> ServiceResult<Goal> {
        validate_request(&request)?;
        let row = self
            .repository
            .create(conversions::convert_to_data_new_goal(request))
            .await?;
        info!("Created goal {}", row.id);
        Ok(conversions::convert_to_domain_goal(row))
    }

    pub async fn update(&self, id: i64, request: UpdateGoalRequest) -> ServiceResult<Goal> {
        validate_request(&request)?;
        self.repository
            .update(id, conversions::convert_to_data_goal_changes(request))
            .await?
            .map(conversions::convert_to_domain_goal)
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
