use health_portal_data::database::DatabasePool;
use health_portal_domain::ai::AnalysisPipeline;
use health_portal_domain::services::Services;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub pool: DatabasePool,
    pub ai_configured: bool,
}

impl AppState {
    /// Wire the services to a pool; without a pipeline AI analysis is disabled
    pub fn new(pool: DatabasePool, pipeline: Option<AnalysisPipeline>) -> Self {
        let ai_configured = pipeline.is_some();
        Self {
            services: Services::new(pool.clone(), pipeline),
            pool,
            ai_configured,
        }
    }
}
