use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for a health goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub current_value: Option<String>,
    pub target_value: Option<String>,
    pub strategy: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalChanges {
    pub name: Option<String>,
    pub current_value: Option<String>,
    pub target_value: Option<String>,
    pub strategy: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}
