use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for the (single) portal user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
}
