use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for an interaction between two supplements.
///
/// Rows are always read joined with `supplements`, so the names of both
/// sides travel with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub supplement_1_id: i64,
    pub supplement_2_id: i64,
    /// `critical`, `warning` or `synergy`
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub supplement_1_name: String,
    pub supplement_2_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewInteraction {
    pub supplement_1_id: i64,
    pub supplement_2_id: i64,
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionChanges {
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
}
