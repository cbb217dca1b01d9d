use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::dates::deserialize_optional_date;
use super::validation::{validate_cycle_type, validate_verdict};

/// A periodic review session with its input data and staged AI commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cycle {
    pub id: i64,
    pub user_id: i64,
    pub cycle_date: NaiveDate,
    /// `full`, `partial` or `control`
    pub cycle_type: Option<String>,
    /// `go`, `wait` or `stop`
    pub verdict: Option<String>,
    /// Free-form snapshot of goals, wellbeing, training, nutrition and metrics
    #[schema(value_type = Option<Object>)]
    pub input_data: Option<Value>,
    pub rsl_output: Option<String>,
    pub master_curator_output: Option<String>,
    pub red_team_output: Option<String>,
    pub meta_supervisor_output: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub decisions: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub required_labs: Option<Value>,
    pub next_review_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for opening a cycle
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCycleRequest {
    /// Defaults to today
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub cycle_date: Option<NaiveDate>,
    #[validate(custom = "validate_cycle_type")]
    pub cycle_type: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub input_data: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub next_review_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCycleRequest {
    #[validate(custom = "validate_verdict")]
    pub verdict: Option<String>,
    pub rsl_output: Option<String>,
    pub master_curator_output: Option<String>,
    pub red_team_output: Option<String>,
    pub meta_supervisor_output: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub decisions: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub required_labs: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub next_review_date: Option<NaiveDate>,
}
