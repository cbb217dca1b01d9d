pub mod ai;
pub mod cycles;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod interactions;
pub mod labs;
pub mod profile;
pub mod reminders;
pub mod supplements;

pub use health::health_check;
