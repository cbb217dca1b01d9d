// Health Portal Domain
// This crate contains the business logic for the Health Portal application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// AI completion client and the staged analysis pipeline
pub mod ai;

// Marker extraction from lab PDFs and pasted text
pub mod labs;

// Health checks and system status
pub mod health;

// Re-export the database module from the data crate for convenience
pub use health_portal_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
