//! Server configuration read from the environment
//!
//! Database settings live in [`health_portal_data::database::DatabaseConfig`];
//! this module covers the HTTP server, CORS, static files and the Claude client.

use std::env;
use std::path::PathBuf;

use health_portal_domain::ai::{DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use tracing::{info, warn};

/// Port used when neither `SERVER_PORT` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 8080;

/// Frontend build served for unmatched paths when it exists
pub const DEFAULT_STATIC_DIR: &str = "../frontend/dist";

/// Origins always allowed by CORS
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Empty when AI analysis is disabled
    pub claude_api_key: String,
    pub claude_model: String,
    pub claude_max_tokens: u32,
    pub claude_api_url: String,
    /// Extra origins from `ALLOWED_ORIGINS`; `*` allows any origin
    pub allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("claude_api_key", &if self.ai_enabled() { "<redacted>" } else { "" })
            .field("claude_model", &self.claude_model)
            .field("claude_max_tokens", &self.claude_max_tokens)
            .field("claude_api_url", &self.claude_api_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            claude_api_key: String::new(),
            claude_model: DEFAULT_MODEL.to_string(),
            claude_max_tokens: DEFAULT_MAX_TOKENS,
            claude_api_url: DEFAULT_API_URL.to_string(),
            allowed_origins: Vec::new(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Invalid port '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let claude_max_tokens = match var("CLAUDE_MAX_TOKENS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(tokens) if tokens > 0 => tokens,
                _ => {
                    warn!("Invalid CLAUDE_MAX_TOKENS '{}', using {}", raw, DEFAULT_MAX_TOKENS);
                    DEFAULT_MAX_TOKENS
                }
            },
            None => DEFAULT_MAX_TOKENS,
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            port,
            claude_api_key: var("CLAUDE_API_KEY").unwrap_or_default(),
            claude_model: var("CLAUDE_MODEL").unwrap_or(defaults.claude_model),
            claude_max_tokens,
            claude_api_url: var("CLAUDE_API_URL").unwrap_or(defaults.claude_api_url),
            allowed_origins,
            static_dir: var("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        };

        info!(
            "Server configuration: port={}, ai_enabled={}, model={}, static_dir={}",
            config.port,
            config.ai_enabled(),
            config.claude_model,
            config.static_dir.display()
        );
        config
    }

    pub fn ai_enabled(&self) -> bool {
        !self.claude_api_key.is_empty()
    }

    /// Whether `ALLOWED_ORIGINS` contains the `*` wildcard
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    /// Default origins followed by the configured ones, without duplicates
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();
        for origin in &self.allowed_origins {
            if origin != "*" && !origins.contains(origin) {
                origins.push(origin.clone());
            }
        }
        origins
    }
}
