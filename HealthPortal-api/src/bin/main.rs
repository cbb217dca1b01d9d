use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_portal_api::{create_app, AppConfig, AppState};
use health_portal_data::database::{initialize_database_pool, DatabaseConfig};
use health_portal_domain::ai::{AnalysisPipeline, ClaudeClient, ClaudeConfig};

/// Build the analysis pipeline when a Claude API key is configured
fn build_pipeline(config: &AppConfig) -> anyhow::Result<Option<AnalysisPipeline>> {
    if !config.ai_enabled() {
        warn!("CLAUDE_API_KEY is not set; AI analysis is disabled and lab parsing uses the rule-based parser");
        return Ok(None);
    }

    let client = ClaudeClient::new(ClaudeConfig {
        model: config.claude_model.clone(),
        api_url: config.claude_api_url.clone(),
        ..ClaudeConfig::new(config.claude_api_key.clone())
    })
    .context("failed to build the Claude client")?;

    info!("AI analysis enabled with model {}", client.model());
    Ok(Some(AnalysisPipeline::new(
        Arc::new(client),
        config.claude_max_tokens,
    )))
}

/// The main entry point for the Health Portal API server
///
/// Loads `.env`, sets up tracing, opens the database pool, builds the router
/// and serves it until CTRL+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting Health Portal API server");

    let config = AppConfig::from_env();

    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;
    let pool = initialize_database_pool(&db_config).context("failed to initialize the database")?;
    info!("Database ready: {}", pool.get_connection_info());

    let pipeline = build_pipeline(&config)?;
    let state = AppState::new(pool, pipeline);
    let app = create_app(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on CTRL+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
