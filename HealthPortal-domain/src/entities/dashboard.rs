use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::cycle::Cycle;
use super::reminder::Reminder;

/// Where a marker value sits relative to its reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabStatus {
    Low,
    Normal,
    High,
}

impl LabStatus {
    /// Classify a value; a missing bound never triggers
    pub fn classify(value: f64, reference_min: Option<f64>, reference_max: Option<f64>) -> Self {
        match (reference_min, reference_max) {
            (Some(min), _) if value < min => LabStatus::Low,
            (_, Some(max)) if value > max => LabStatus::High,
            _ => LabStatus::Normal,
        }
    }
}

/// Latest value of a marker that falls outside its reference range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabAlert {
    pub marker_name: String,
    pub latest_value: f64,
    pub latest_date: NaiveDate,
    pub unit: Option<String>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub status: LabStatus,
}

/// Aggregate shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub active_supplements: usize,
    pub active_goals: usize,
    pub critical_interactions: usize,
    pub todays_reminders: Vec<Reminder>,
    pub latest_cycle: Option<Cycle>,
    pub lab_alerts: Vec<LabAlert>,
}
