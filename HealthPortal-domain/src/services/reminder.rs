use std::sync::Arc;

use chrono::{Datelike, Local};

use health_portal_data::repository::ReminderRepositoryTrait;

use super::{validate_request, ServiceError, ServiceResult};
use crate::entities::conversions;
use crate::entities::{CreateReminderRequest, Reminder, UpdateReminderRequest};

#[derive(Clone)]
pub struct ReminderService {
    repository: Arc<dyn ReminderRepositoryTrait>,
}

/// ISO weekday of the server's local date, Monday = 1
pub fn today_iso_weekday() -> u8 {
    Local::now().weekday().number_from_monday() as u8
}

impl ReminderService {
    pub fn new(repository: Arc<dyn ReminderRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Reminder with ID {} not found", id))
    }

    pub async fn list(&self, active_only: bool) -> ServiceResult<Vec<Reminder>> {
        let rows = self.repository.list(active_only).await?;
        Ok(rows.into_iter().map(conversions::convert_to_domain_reminder).collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Reminder> {
        self.repository
            .get(id)
            .await?
            .map(conversions::convert_to_domain_reminder)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, request: CreateReminderRequest) -> ServiceResult<Reminder> {
        validate_request(&request)?;
        let row = self
            .repository
            .create(conversions::convert_to_data_new_reminder(request))
            .await?;
        Ok(conversions::convert_to_domain_reminder(row))
    }

    pub async fn update(&self, id: i64, request: UpdateReminderRequest) -> ServiceResult<Reminder> {
        validate_request(&request)?;
        self.repository
            .update(id, conversions::convert_to_data_reminder_changes(request))
            .await?
            .map(conversions::convert_to_domain_reminder)
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    pub async fn toggle(&self, id: i64) -> ServiceResult<Reminder> {
        self.repository
            .toggle(id)
            .await?
            .map(conversions::convert_to_domain_reminder)
            .ok_or_else(|| Self::not_found(id))
    }

    /// Active reminders due on the given ISO weekday
    pub async fn due_on(&self, iso_weekday: u8) -> ServiceResult<Vec<Reminder>> {
        let reminders = self.list(true).await?;
        Ok(reminders
            .into_iter()
            .filter(|reminder| reminder.is_due_on(iso_weekday))
            .collect())
    }

    pub async fn today(&self) -> ServiceResult<Vec<Reminder>> {
        self.due_on(today_iso_weekday()).await
    }
}
