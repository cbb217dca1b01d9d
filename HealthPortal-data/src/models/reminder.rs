use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for a recurring reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub reminder_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Local time as `HH:MM`
    pub time: Option<String>,
    /// ISO weekdays (Monday = 1); empty means every day
    pub days_of_week: Vec<u8>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReminder {
    pub reminder_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub time: Option<String>,
    pub days_of_week: Vec<u8>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderChanges {
    pub reminder_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub days_of_week: Option<Vec<u8>>,
    pub is_active: Option<bool>,
}
