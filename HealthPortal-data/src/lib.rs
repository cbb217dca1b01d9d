// Health Portal Data
// This crate owns the SQLite schema and all data access

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
