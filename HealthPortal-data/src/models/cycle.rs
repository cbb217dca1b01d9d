use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage model for a review cycle and its staged AI commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: i64,
    pub user_id: i64,
    pub cycle_date: NaiveDate,
    /// `full`, `partial` or `control`
    pub cycle_type: Option<String>,
    /// `go`, `wait` or `stop`
    pub verdict: Option<String>,
    pub input_data: Option<Value>,
    pub rsl_output: Option<String>,
    pub master_curator_output: Option<String>,
    pub red_team_output: Option<String>,
    pub meta_supervisor_output: Option<String>,
    pub decisions: Option<Value>,
    pub required_labs: Option<Value>,
    pub next_review_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCycle {
    pub cycle_date: NaiveDate,
    pub cycle_type: Option<String>,
    pub input_data: Option<Value>,
    pub next_review_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleChanges {
    pub verdict: Option<String>,
    pub rsl_output: Option<String>,
    pub master_curator_output: Option<String>,
    pub red_team_output: Option<String>,
    pub meta_supervisor_output: Option<String>,
    pub decisions: Option<Value>,
    pub required_labs: Option<Value>,
    pub next_review_date: Option<NaiveDate>,
}

/// Outputs of the analysis stages; absent stages leave the stored text alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageOutputs {
    pub rsl_output: Option<String>,
    pub master_curator_output: Option<String>,
    pub red_team_output: Option<String>,
    pub meta_supervisor_output: Option<String>,
}

impl StageOutputs {
    /// Whether no stage produced output
    pub fn is_empty(&self) -> bool {
        self.rsl_output.is_none()
            && self.master_curator_output.is_none()
            && self.red_team_output.is_none()
            && self.meta_supervisor_output.is_none()
    }
}
