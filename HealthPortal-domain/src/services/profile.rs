use std::sync::Arc;

use health_portal_data::repository::UserRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{Profile, UpdateProfileRequest};

/// The single implicit user's profile
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found() -> ServiceError {
        ServiceError::NotFound("Profile not found".to_string())
    }

    pub async fn get(&self) -> ServiceResult<Profile> {
        self.repository
            .get_profile()
            .await?
            .map(conversions::convert_to_domain_profile)
            .ok_or_else(Self::not_found)
    }

    pub async fn update(&self, request: UpdateProfileRequest) -> ServiceResult<Profile> {
        validate_request(&request)?;
        self.repository
            .update_profile(conversions::convert_to_data_user_changes(request))
            .await?
            .map(conversions::convert_to_domain_profile)
            .ok_or_else(Self::not_found)
    }
}
