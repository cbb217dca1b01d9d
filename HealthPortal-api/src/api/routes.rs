use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::api::handlers::{
    ai, cycles, dashboard, goals, health, interactions, labs, profile, reminders, supplements,
};
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    debug!("Creating application router");

    // Fixed segments are registered before the `:id` routes they would shadow
    let api_routes = Router::new()
        .route(
            "/supplements",
            get(supplements::list_supplements).post(supplements::create_supplement),
        )
        .route("/supplements/schedule", get(supplements::get_schedule))
        .route("/supplements/by-category", get(supplements::get_by_category))
        .route(
            "/supplements/:id",
            get(supplements::get_supplement)
                .put(supplements::update_supplement)
                .delete(supplements::delete_supplement),
        )
        .route("/goals", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/goals/:id",
            get(goals::get_goal).put(goals::update_goal).delete(goals::delete_goal),
        )
        .route("/labs", get(labs::list_labs).post(labs::create_lab))
        .route("/labs/import", post(labs::import_labs))
        .route("/labs/trends", get(labs::get_trends))
        .route("/labs/marker/:name", get(labs::get_by_marker))
        .route(
            "/labs/:id",
            get(labs::get_lab).put(labs::update_lab).delete(labs::delete_lab),
        )
        .route(
            "/interactions",
            get(interactions::list_interactions).post(interactions::create_interaction),
        )
        .route(
            "/interactions/:id",
            get(interactions::get_interaction)
                .put(interactions::update_interaction)
                .delete(interactions::delete_interaction),
        )
        .route(
            "/reminders",
            get(reminders::list_reminders).post(reminders::create_reminder),
        )
        .route("/reminders/today", get(reminders::get_today))
        .route(
            "/reminders/:id",
            get(reminders::get_reminder)
                .put(reminders::update_reminder)
                .delete(reminders::delete_reminder),
        )
        .route("/reminders/:id/toggle", post(reminders::toggle_reminder))
        .route("/cycles", get(cycles::list_cycles).post(cycles::create_cycle))
        .route("/cycles/latest", get(cycles::get_latest_cycle))
        .route(
            "/cycles/:id",
            get(cycles::get_cycle)
                .put(cycles::update_cycle)
                .delete(cycles::delete_cycle),
        )
        .route("/ai/analyze", post(ai::analyze))
        .route("/ai/analysis/:cycle_id", get(ai::get_analysis))
        .route("/ai/parse-labs", post(ai::parse_labs))
        .route(
            "/ai/parse-pdf",
            post(ai::parse_pdf).layer(DefaultBodyLimit::max(ai::MAX_PDF_UPLOAD_BYTES)),
        )
        .route("/dashboard/summary", get(dashboard::get_summary))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        );

    debug!("API routes configured");

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(configure_swagger_routes());

    debug!("Swagger UI merged");

    let app = add_static_files(app, config);

    health::initialize_server_start_time();

    app.layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// Serve the frontend build for unmatched paths, with `index.html` as the SPA fallback
fn add_static_files(app: Router, config: &AppConfig) -> Router {
    let static_dir = &config.static_dir;
    if !static_dir.is_dir() {
        debug!("Static directory {} not found; not serving files", static_dir.display());
        return app;
    }

    info!("Serving static files from {}", static_dir.display());
    let index = static_dir.join("index.html");
    app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
}

/// CORS for the frontend dev servers plus `ALLOWED_ORIGINS`
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        warn!("CORS: allowing all origins (ALLOWED_ORIGINS=*)");
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("CORS: invalid origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .max_age(Duration::from_secs(300))
}
