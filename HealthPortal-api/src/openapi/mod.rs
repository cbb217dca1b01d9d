use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use health_portal_domain::entities::{
    AnalysisRequest, AnalysisResponse, AnalyzeResponse, CreateCycleRequest, CreateGoalRequest,
    CreateInteractionRequest, CreateLabResultRequest, CreateReminderRequest,
    CreateSupplementRequest, Cycle, DashboardSummary, Goal, ImportLabsRequest, ImportLabsResponse,
    Interaction, LabAlert, LabResult, LabStatus, LabTrend, LabTrendPoint, ParseLabsRequest,
    ParseLabsResponse, ParsedMarker, Profile, Reminder, ScheduleSlot, Supplement,
    UpdateCycleRequest, UpdateGoalRequest, UpdateInteractionRequest, UpdateLabResultRequest,
    UpdateProfileRequest, UpdateReminderRequest, UpdateSupplementRequest,
};

use crate::api::handlers::health::{ComponentHealthStatus, HealthResponse};
use crate::entities::{DeletedResponse, ErrorResponse, ParsePdfForm};

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoint
        crate::api::handlers::health::health_check,

        // Supplements
        crate::api::handlers::supplements::list_supplements,
        crate::api::handlers::supplements::create_supplement,
        crate::api::handlers::supplements::get_schedule,
        crate::api::handlers::supplements::get_by_category,
        crate::api::handlers::supplements::get_supplement,
        crate::api::handlers::supplements::update_supplement,
        crate::api::handlers::supplements::delete_supplement,

        // Goals
        crate::api::handlers::goals::list_goals,
        crate::api::handlers::goals::create_goal,
        crate::api::handlers::goals::get_goal,
        crate::api::handlers::goals::update_goal,
        crate::api::handlers::goals::delete_goal,

        // Labs
        crate::api::handlers::labs::list_labs,
        crate::api::handlers::labs::create_lab,
        crate::api::handlers::labs::import_labs,
        crate::api::handlers::labs::get_trends,
        crate::api::handlers::labs::get_by_marker,
        crate::api::handlers::labs::get_lab,
        crate::api::handlers::labs::update_lab,
        crate::api::handlers::labs::delete_lab,

        // Interactions
        crate::api::handlers::interactions::list_interactions,
        crate::api::handlers::interactions::create_interaction,
        crate::api::handlers::interactions::get_interaction,
        crate::api::handlers::interactions::update_interaction,
        crate::api::handlers::interactions::delete_interaction,

        // Reminders
        crate::api::handlers::reminders::list_reminders,
        crate::api::handlers::reminders::create_reminder,
        crate::api::handlers::reminders::get_today,
        crate::api::handlers::reminders::get_reminder,
        crate::api::handlers::reminders::update_reminder,
        crate::api::handlers::reminders::delete_reminder,
        crate::api::handlers::reminders::toggle_reminder,

        // Cycles
        crate::api::handlers::cycles::list_cycles,
        crate::api::handlers::cycles::create_cycle,
        crate::api::handlers::cycles::get_latest_cycle,
        crate::api::handlers::cycles::get_cycle,
        crate::api::handlers::cycles::update_cycle,
        crate::api::handlers::cycles::delete_cycle,

        // AI analysis and lab parsing
        crate::api::handlers::ai::analyze,
        crate::api::handlers::ai::get_analysis,
        crate::api::handlers::ai::parse_labs,
        crate::api::handlers::ai::parse_pdf,

        // Dashboard and profile
        crate::api::handlers::dashboard::get_summary,
        crate::api::handlers::profile::get_profile,
        crate::api::handlers::profile::update_profile
    ),
    components(
        schemas(
            // Resources
            Supplement, CreateSupplementRequest, UpdateSupplementRequest, ScheduleSlot,
            Goal, CreateGoalRequest, UpdateGoalRequest,
            LabResult, CreateLabResultRequest, UpdateLabResultRequest,
            LabTrend, LabTrendPoint, ImportLabsRequest, ImportLabsResponse,
            Interaction, CreateInteractionRequest, UpdateInteractionRequest,
            Reminder, CreateReminderRequest, UpdateReminderRequest,
            Cycle, CreateCycleRequest, UpdateCycleRequest,
            Profile, UpdateProfileRequest,
            DashboardSummary, LabAlert, LabStatus,

            // AI
            AnalysisRequest, AnalysisResponse, AnalyzeResponse,
            ParseLabsRequest, ParseLabsResponse, ParsedMarker, ParsePdfForm,

            // Common
            ErrorResponse, DeletedResponse, HealthResponse, ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "supplements", description = "Supplement stack and schedule"),
        (name = "goals", description = "Health goals"),
        (name = "labs", description = "Lab results and marker trends"),
        (name = "interactions", description = "Interactions between supplements"),
        (name = "reminders", description = "Recurring reminders"),
        (name = "cycles", description = "Periodic review cycles"),
        (name = "ai", description = "Staged AI analysis and lab report parsing"),
        (name = "dashboard", description = "Dashboard aggregate"),
        (name = "profile", description = "User profile")
    ),
    info(
        title = "Health Portal API",
        version = "0.1.0",
        description = "Personal health tracking with AI-assisted review cycles",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
