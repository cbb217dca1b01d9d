// HealthPortal-api lib.rs
//
// HTTP surface of the Health Portal: router, handlers, configuration and
// OpenAPI documentation. The binary in src/bin/main.rs wires it to a pool.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;

pub use api::{create_app, AppState};
pub use config::AppConfig;
