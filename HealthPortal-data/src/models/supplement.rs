use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to newly created supplements
pub const STATUS_ACTIVE: &str = "active";

/// Status written by a soft delete
pub const STATUS_REMOVED: &str = "removed";

/// Storage model for a supplement in the user's stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub dose: Option<String>,
    /// Free-form time slot, e.g. "morning" or "08:00"
    pub time_of_day: Option<String>,
    pub category: Option<String>,
    pub mechanism: Option<String>,
    pub target: Option<String>,
    /// One of `active`, `paused`, `removed`
    pub status: String,
    pub evidence_level: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the supplement is soft deleted
    pub removed_at: Option<DateTime<Utc>>,
}

/// Input data for inserting a supplement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSupplement {
    pub name: String,
    pub dose: Option<String>,
    pub time_of_day: Option<String>,
    pub category: Option<String>,
    pub mechanism: Option<String>,
    pub target: Option<String>,
    pub evidence_level: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplementChanges {
    pub name: Option<String>,
    pub dose: Option<String>,
    pub time_of_day: Option<String>,
    pub category: Option<String>,
    pub mechanism: Option<String>,
    pub target: Option<String>,
    pub status: Option<String>,
    pub evidence_level: Option<String>,
    pub notes: Option<String>,
}

/// Optional list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplementFilter {
    pub status: Option<String>,
    pub category: Option<String>,
}
