use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{validate_clock_time, validate_days_of_week};

/// A recurring reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub reminder_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    /// ISO weekdays (Monday = 1). Empty means every day.
    pub days_of_week: Vec<u8>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Whether the reminder fires on the given ISO weekday
    pub fn is_due_on(&self, iso_weekday: u8) -> bool {
        self.days_of_week.is_empty() || self.days_of_week.contains(&iso_weekday)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReminderRequest {
    pub reminder_type: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom = "validate_clock_time")]
    pub time: Option<String>,
    #[validate(custom = "validate_days_of_week")]
    pub days_of_week: Option<Vec<u8>>,
    /// Defaults to `true`
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReminderRequest {
    pub reminder_type: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom = "validate_clock_time")]
    pub time: Option<String>,
    #[validate(custom = "validate_days_of_week")]
    pub days_of_week: Option<Vec<u8>>,
    pub is_active: Option<bool>,
}
