use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::dates::deserialize_optional_date;

/// The portal user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[validate(range(min = 50, max = 272, message = "Height must be between 50 and 272 cm"))]
    pub height_cm: Option<i64>,
    #[validate(range(min = 20.0, max = 400.0, message = "Weight must be between 20 and 400 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 1.0, max = 70.0, message = "Body fat must be between 1 and 70 percent"))]
    pub body_fat_pct: Option<f64>,
}
