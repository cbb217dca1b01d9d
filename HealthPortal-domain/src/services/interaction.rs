use std::sync::Arc;

use tracing::info;

use health_portal_data::repository::InteractionRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{CreateInteractionRequest, Interaction, UpdateInteractionRequest};

#[derive(Clone)]
pub struct InteractionService {
    repository: Arc<dyn InteractionRepositoryTrait>,
}

impl InteractionService {
    pub fn new(repository: Arc<dyn InteractionRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Interaction with ID {} not found", id))
    }

    pub async fn list(&self, interaction_type: Option<String>) -> ServiceResult<Vec<Interaction>> {
        let rows = self.repository.list(interaction_type).await?;
        Ok(rows
            .into_iter()
            .map(conversions::convert_to_domain_interaction)
            .collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Interaction> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_interaction)
            .ok_or_else(|| Self::not_found(id))
    }

    /// Both supplements must exist; an unknown id fails as a validation error
    pub async fn create(&self, request: CreateInteractionRequest) -> ServiceResult<Interaction> {
        validate_request(&request)?;
        let row = self
            .repository
            .create(conversions::convert_to_data_new_interaction(request))
            .await?;
        info!(
            "Recorded interaction {} between {} and {}",
            row.id, row.supplement_1_name, row.supplement_2_name
        );
        Ok(conversions::convert_to_domain_interaction(row))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateInteractionRequest,
    ) -> ServiceResult<Interaction> {
        validate_request(&request)?;
        self.repository
            .update(id, conversions::convert_to_data_interaction_changes(request))
            .await?
            .map(conversions::convert_to_domain_interaction)
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
    use health_portal_data::database::DatabasePool;
    use health_portal_data::models::NewSupplement;
    use health_portal_data::repository::{
        InteractionRepository, SupplementRepository, SupplementRepositoryTrait,
    };

    async fn setup() -> (InteractionService, i64, i64) {
        let pool = DatabasePool::in_memory().unwrap();
        let supplements = SupplementRepository::new(pool.clone());
        let zinc = supplements
            .create(NewSupplement {
                name: "Zinc".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let copper = supplements
            .create(NewSupplement {
                name: "Copper".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let service = InteractionService::new(Arc::new(InteractionRepository::new(pool)));
        (service, zinc.id, copper.id)
    }

    fn request(a: i64, b: i64) -> CreateInteractionRequest {
        CreateInteractionRequest {
            supplement_1_id: a,
            supplement_2_id: b,
            interaction_type: Some("warning".to_string()),
            description: Some("Zinc depletes copper".to_string()),
            solution: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_joined_names() {
        let (service, zinc, copper) = setup().await;
        let interaction = service.create(request(zinc, copper)).await.unwrap();
        assert_eq!(interaction.supplement_1_name, "Zinc");
        assert_eq!(interaction.supplement_2_name, "Copper");
    }

    #[tokio::test]
    async fn test_create_rejects_same_or_unknown_supplements() {
        let (service, zinc, _) = setup().await;
        assert!(matches!(
            service.create(request(zinc, zinc)).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create(request(0, zinc)).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create(request(zinc, 999)).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
