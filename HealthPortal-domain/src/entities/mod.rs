// Domain entities and request payloads
pub mod analysis;
pub mod conversions;
pub mod cycle;
pub mod dashboard;
pub mod dates;
pub mod goal;
pub mod interaction;
pub mod lab;
pub mod profile;
pub mod reminder;
pub mod supplement;
pub mod validation;

// Re-export common types for easier imports
pub use analysis::{
    AnalysisRequest, AnalysisResponse, AnalysisResults, AnalyzeResponse, ParseLabsRequest,
    ParseLabsResponse, ParsedMarker,
};
pub use cycle::{CreateCycleRequest, Cycle, UpdateCycleRequest};
pub use dashboard::{DashboardSummary, LabAlert, LabStatus};
pub use goal::{CreateGoalRequest, Goal, UpdateGoalRequest};
pub use interaction::{CreateInteractionRequest, Interaction, UpdateInteractionRequest};
pub use lab::{
    CreateLabResultRequest, ImportLabsRequest, ImportLabsResponse, LabResult, LabTrend,
    LabTrendPoint, UpdateLabResultRequest,
};
pub use profile::{Profile, UpdateProfileRequest};
pub use reminder::{CreateReminderRequest, Reminder, UpdateReminderRequest};
pub use supplement::{
    CreateSupplementRequest, ScheduleSlot, Supplement, SupplementsByCategory,
    UpdateSupplementRequest,
};
