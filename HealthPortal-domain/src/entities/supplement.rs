use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_supplement_status;

/// A supplement in the user's stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Supplement {
    /// Unique identifier
    pub id: i64,
    pub user_id: i64,
    /// Display name, e.g. "Magnesium glycinate"
    pub name: String,
    pub dose: Option<String>,
    /// Time slot such as "morning" or "08:00"
    pub time_of_day: Option<String>,
    pub category: Option<String>,
    /// How the supplement is expected to work
    pub mechanism: Option<String>,
    /// What the supplement is taken for
    pub target: Option<String>,
    /// `active`, `paused` or `removed`
    pub status: String,
    pub evidence_level: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the supplement has been removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
}

/// Request payload for adding a supplement
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSupplementRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 100))]
    pub dose: Option<String>,
    #[validate(length(max = 50))]
    pub time_of_day: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub mechanism: Option<String>,
    pub target: Option<String>,
    pub evidence_level: Option<String>,
    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for a partial supplement update; omitted fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplementRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub dose: Option<String>,
    #[validate(length(max = 50))]
    pub time_of_day: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub mechanism: Option<String>,
    pub target: Option<String>,
    #[validate(custom = "validate_supplement_status")]
    pub status: Option<String>,
    pub evidence_level: Option<String>,
    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

/// Active supplements sharing one time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleSlot {
    pub time_of_day: String,
    pub supplements: Vec<Supplement>,
}

/// Active supplements keyed by category, in category order
pub type SupplementsByCategory = IndexMap<String, Vec<Supplement>>;
