use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::validation::validate_interaction_type;

/// An interaction between two supplements, with both names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Interaction {
    pub id: i64,
    pub supplement_1_id: i64,
    pub supplement_2_id: i64,
    /// `critical`, `warning` or `synergy`
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    /// How to mitigate the interaction, e.g. "take 4 hours apart"
    pub solution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub supplement_1_name: String,
    pub supplement_2_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_supplements"))]
pub struct CreateInteractionRequest {
    #[validate(range(min = 1, message = "supplement_1_id must be a positive id"))]
    pub supplement_1_id: i64,
    #[validate(range(min = 1, message = "supplement_2_id must be a positive id"))]
    pub supplement_2_id: i64,
    #[validate(custom = "validate_interaction_type")]
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
}

fn validate_distinct_supplements(request: &CreateInteractionRequest) -> Result<(), ValidationError> {
    if request.supplement_1_id == request.supplement_2_id {
        let mut error = ValidationError::new("distinct_supplements");
        error.message = Some("an interaction needs two different supplements".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInteractionRequest {
    #[validate(custom = "validate_interaction_type")]
    pub interaction_type: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
}
