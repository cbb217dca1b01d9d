use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for a single lab marker measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub id: i64,
    pub user_id: i64,
    pub test_date: NaiveDate,
    pub lab_name: Option<String>,
    pub marker_name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for inserting a lab result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLabResult {
    pub test_date: NaiveDate,
    pub lab_name: Option<String>,
    pub marker_name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabResultChanges {
    pub test_date: Option<NaiveDate>,
    pub lab_name: Option<String>,
    pub marker_name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}
