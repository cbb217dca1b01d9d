use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{validate_goal_priority, validate_goal_status};

/// A health goal the user is working towards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub current_value: Option<String>,
    pub target_value: Option<String>,
    pub strategy: Option<String>,
    /// `critical`, `high`, `medium` or `background`
    pub priority: Option<String>,
    /// `active`, `achieved` or `paused`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    pub current_value: Option<String>,
    pub target_value: Option<String>,
    pub strategy: Option<String>,
    #[validate(custom = "validate_goal_priority")]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    pub current_value: Option<String>,
    pub target_value: Option<String>,
    pub strategy: Option<String>,
    #[validate(custom = "validate_goal_priority")]
    pub priority: Option<String>,
    #[validate(custom = "validate_goal_status")]
    pub status: Option<String>,
}
