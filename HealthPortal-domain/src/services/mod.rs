// Domain services
// One service per resource, each wrapping its repository trait object.

pub mod analysis;
pub mod cycle;
pub mod dashboard;
pub mod goal;
pub mod interaction;
pub mod lab;
pub mod lab_parsing;
pub mod profile;
pub mod reminder;
pub mod supplement;

use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use health_portal_data::database::DatabasePool;
use health_portal_data::repository::{
    CycleRepository, GoalRepository, InteractionRepository, LabResultRepository,
    ReminderRepository, RepositoryError, SupplementRepository, UserRepository,
};

use crate::ai::{AiError, AnalysisPipeline};
use crate::labs::LabParseError;

pub use analysis::AnalysisService;
pub use cycle::CycleService;
pub use dashboard::DashboardService;
pub use goal::GoalService;
pub use interaction::InteractionService;
pub use lab::LabService;
pub use lab_parsing::LabParsingService;
pub use profile::ProfileService;
pub use reminder::ReminderService;
pub use supplement::SupplementService;

/// Errors shared by every domain service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The addressed record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Storage failure
    #[error("Repository error: {0}")]
    Repository(String),

    /// Model provider failure
    #[error("AI analysis failed: {0}")]
    Ai(#[from] AiError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ServiceError::Validation(msg),
            _ => ServiceError::Repository(err.to_string()),
        }
    }
}

impl From<LabParseError> for ServiceError {
    fn from(err: LabParseError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Result alias used by every service
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Run `validator` checks and flatten the failures into one message
pub fn validate_request<T: Validate>(request: &T) -> ServiceResult<()> {
    if let Err(validation_errors) = request.validate() {
        let mut fields: Vec<_> = validation_errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let error_message = fields
            .into_iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                if field == "__all__" {
                    error_msgs.join(", ")
                } else {
                    format!("{}: {}", field, error_msgs.join(", "))
                }
            })
            .collect::<Vec<String>>()
            .join("; ");

        return Err(ServiceError::Validation(error_message));
    }
    Ok(())
}

/// Every service, wired to one database pool
#[derive(Clone)]
pub struct Services {
    pub supplements: SupplementService,
    pub goals: GoalService,
    pub labs: LabService,
    pub interactions: InteractionService,
    pub reminders: ReminderService,
    pub cycles: CycleService,
    pub profile: ProfileService,
    pub dashboard: DashboardService,
    pub analysis: AnalysisService,
    pub lab_parsing: LabParsingService,
}

impl Services {
    /// Build the services over SQLite repositories. Without a pipeline the
    /// analysis endpoints report that AI is not configured and lab parsing
    /// uses the rule-based parser.
    pub fn new(pool: DatabasePool, pipeline: Option<AnalysisPipeline>) -> Self {
        let supplements = Arc::new(SupplementRepository::new(pool.clone()));
        let goals = Arc::new(GoalRepository::new(pool.clone()));
        let labs = Arc::new(LabResultRepository::new(pool.clone()));
        let interactions = Arc::new(InteractionRepository::new(pool.clone()));
        let reminders = Arc::new(ReminderRepository::new(pool.clone()));
        let cycles = Arc::new(CycleRepository::new(pool.clone()));
        let users = Arc::new(UserRepository::new(pool));

        Self {
            supplements: SupplementService::new(supplements.clone()),
            goals: GoalService::new(goals.clone()),
            labs: LabService::new(labs.clone()),
            interactions: InteractionService::new(interactions.clone()),
            reminders: ReminderService::new(reminders.clone()),
            cycles: CycleService::new(cycles.clone()),
            profile: ProfileService::new(users),
            dashboard: DashboardService::new(
                supplements,
                goals,
                interactions,
                reminders,
                cycles.clone(),
                labs,
            ),
            analysis: AnalysisService::new(cycles, pipeline.clone()),
            lab_parsing: LabParsingService::new(pipeline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CreateGoalRequest, CreateInteractionRequest};

    #[test]
    fn test_validate_request_formats_field_errors() {
        let request = CreateGoalRequest {
            name: String::new(),
            current_value: None,
            target_value: None,
            strategy: None,
            priority: Some("urgent".to_string()),
        };

        let err = validate_request(&request).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation error: "));
        assert!(message.contains("name: Name must be between 1 and 200 characters"));
        assert!(message.contains("priority: "));
    }

    #[test]
    fn test_validate_request_reports_struct_level_errors() {
        let request = CreateInteractionRequest {
            supplement_1_id: 3,
            supplement_2_id: 3,
            interaction_type: None,
            description: None,
            solution: None,
        };

        let err = validate_request(&request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: an interaction needs two different supplements"
        );
    }

    #[test]
    fn test_repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound("x".into())),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Validation("x".into())),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Database(
                health_portal_data::database::DatabaseError::TaskError("boom".into())
            )),
            ServiceError::Repository(_)
        ));
    }
}
