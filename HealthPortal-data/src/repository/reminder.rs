use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepoResult;
use super::{json_column, json_text, DEFAULT_USER_ID};
use crate::database::DatabasePool;
use crate::models::{NewReminder, Reminder, ReminderChanges};

const REMINDER_COLUMNS: &str =
    "id, user_id, reminder_type, title, description, time, days_of_week, is_active, created_at";

/// Repository trait for reminders
#[async_trait]
pub trait ReminderRepositoryTrait: Send + Sync {
    /// List reminders ordered by time, optionally only the active ones
    async fn list(&self, active_only: bool) -> RepoResult<Vec<Reminder>>;
    async fn get(&self, id: i64) -> RepoResult<Option<Reminder>>;
    async fn create(&self, new: NewReminder) -> RepoResult<Reminder>;
    async fn update(&self, id: i64, changes: ReminderChanges) -> RepoResult<Option<Reminder>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    /// Flip `is_active`, returning the updated reminder
    async fn toggle(&self, id: i64) -> RepoResult<Option<Reminder>>;
}

#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: DatabasePool,
}

impl ReminderRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_reminder(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        reminder_type: row.get("reminder_type")?,
        title: row.get("title")?,
        description: row.get("description")?,
        time: row.get("time")?,
        days_of_week: json_column(row, "days_of_week")?.unwrap_or_default(),
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl ReminderRepositoryTrait for ReminderRepository {
    async fn list(&self, active_only: bool) -> RepoResult<Vec<Reminder>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Reminder>> {
                let sql = format!(
                    "SELECT {} FROM reminders
                     WHERE user_id = ?1 AND (?2 = 0 OR is_active = 1)
                     ORDER BY time IS NULL, time ASC",
                    REMINDER_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let reminders = stmt
                    .query_map(params![DEFAULT_USER_ID, active_only], map_reminder)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(reminders)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<Reminder>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Reminder>> {
                let sql = format!("SELECT {} FROM reminders WHERE id = ?1", REMINDER_COLUMNS);
                let reminder = conn.query_row(&sql, params![id], map_reminder).optional()?;
                Ok(reminder)
            })
            .await
    }

    async fn create(&self, new: NewReminder) -> RepoResult<Reminder> {
        debug!("Creating reminder {}", new.title);

        self.pool
            .run(move |conn| -> RepoResult<Reminder> {
                let days = serde_json::to_string(&new.days_of_week)?;
                let sql = format!(
                    "INSERT INTO reminders
                        (user_id, reminder_type, title, description, time, days_of_week, is_active, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                     RETURNING {}",
                    REMINDER_COLUMNS
                );
                let reminder = conn.query_row(
                    &sql,
                    params![
                        DEFAULT_USER_ID,
                        new.reminder_type,
                        new.title,
                        new.description,
                        new.time,
                        days,
                        new.is_active.unwrap_or(true),
                        Utc::now(),
                    ],
                    map_reminder,
                )?;
                Ok(reminder)
            })
            .await
    }

    async fn update(&self, id: i64, changes: ReminderChanges) -> RepoResult<Option<Reminder>> {
        debug!("Updating reminder {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Reminder>> {
                let days = json_text(changes.days_of_week.as_ref())?;
                let sql = format!(
                    "UPDATE reminders SET
                        reminder_type = COALESCE(?2, reminder_type),
                        title = COALESCE(?3, title),
                        description = COALESCE(?4, description),
                        time = COALESCE(?5, time),
                        days_of_week = COALESCE(?6, days_of_week),
                        is_active = COALESCE(?7, is_active)
                     WHERE id = ?1
                     RETURNING {}",
                    REMINDER_COLUMNS
                );
                let reminder = conn
                    .query_row(
                        &sql,
                        params![
                            id,
                            changes.reminder_type,
                            changes.title,
                            changes.description,
                            changes.time,
                            days,
                            changes.is_active,
                        ],
                        map_reminder,
                    )
                    .optional()?;
                Ok(reminder)
            })
            .await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
                Ok(affected > 0)
            })
            .await
    }

    async fn toggle(&self, id: i64) -> RepoResult<Option<Reminder>> {
        debug!("Toggling reminder {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Reminder>> {
                let sql = format!(
                    "UPDATE reminders SET is_active = NOT is_active WHERE id = ?1 RETURNING {}",
                    REMINDER_COLUMNS
                );
                let reminder = conn.query_row(&sql, params![id], map_reminder).optional()?;
                Ok(reminder)
            })
            .await
    }
}
