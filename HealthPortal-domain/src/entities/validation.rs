//! Field validators shared by the request payloads

use chrono::NaiveTime;
use validator::ValidationError;

pub const SUPPLEMENT_STATUSES: &[&str] = &["active", "paused", "removed"];
pub const GOAL_PRIORITIES: &[&str] = &["critical", "high", "medium", "background"];
pub const GOAL_STATUSES: &[&str] = &["active", "achieved", "paused"];
pub const INTERACTION_TYPES: &[&str] = &["critical", "warning", "synergy"];
pub const CYCLE_TYPES: &[&str] = &["full", "partial", "control"];
pub const VERDICTS: &[&str] = &["go", "wait", "stop"];

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut error = ValidationError::new(code);
        error.message = Some(format!("must be one of: {}", allowed.join(", ")).into());
        Err(error)
    }
}

pub fn validate_supplement_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, SUPPLEMENT_STATUSES, "supplement_status")
}

pub fn validate_goal_priority(value: &str) -> Result<(), ValidationError> {
    one_of(value, GOAL_PRIORITIES, "goal_priority")
}

pub fn validate_goal_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, GOAL_STATUSES, "goal_status")
}

pub fn validate_interaction_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, INTERACTION_TYPES, "interaction_type")
}

pub fn validate_cycle_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, CYCLE_TYPES, "cycle_type")
}

pub fn validate_verdict(value: &str) -> Result<(), ValidationError> {
    one_of(value, VERDICTS, "verdict")
}

/// Reminder times are 24h `HH:MM`
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        Ok(())
    } else {
        let mut error = ValidationError::new("clock_time");
        error.message = Some("time must be formatted as HH:MM".into());
        Err(error)
    }
}

/// ISO weekdays, Monday = 1
pub fn validate_days_of_week(days: &[u8]) -> Result<(), ValidationError> {
    if days.iter().all(|day| (1..=7).contains(day)) {
        Ok(())
    } else {
        let mut error = ValidationError::new("days_of_week");
        error.message = Some("days must be between 1 (Monday) and 7 (Sunday)".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerated_values() {
        assert!(validate_supplement_status("paused").is_ok());
        assert!(validate_supplement_status("deleted").is_err());
        assert!(validate_goal_priority("background").is_ok());
        assert!(validate_interaction_type("synergy").is_ok());
        assert!(validate_verdict("maybe").is_err());
    }

    #[test]
    fn test_clock_time() {
        assert!(validate_clock_time("08:00").is_ok());
        assert!(validate_clock_time("23:59").is_ok());
        assert!(validate_clock_time("24:00").is_err());
        assert!(validate_clock_time("8:00").is_err());
        assert!(validate_clock_time("morning").is_err());
    }

    #[test]
    fn test_days_of_week() {
        assert!(validate_days_of_week(&[]).is_ok());
        assert!(validate_days_of_week(&[1, 7]).is_ok());
        assert!(validate_days_of_week(&[0]).is_err());
        assert!(validate_days_of_week(&[8]).is_err());
    }
}
