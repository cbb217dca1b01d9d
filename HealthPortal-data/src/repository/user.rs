use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepoResult;
use super::DEFAULT_USER_ID;
use crate::database::DatabasePool;
use crate::models::{User, UserChanges};

const USER_COLUMNS: &str =
    "id, name, birth_date, height_cm, weight_kg, body_fat_pct, created_at, updated_at";

/// Repository trait for the implicit user's profile
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_profile(&self) -> RepoResult<Option<User>>;
    async fn update_profile(&self, changes: UserChanges) -> RepoResult<Option<User>>;
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: DatabasePool,
}

impl UserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
        height_cm: row.get("height_cm")?,
        weight_kg: row.get("weight_kg")?,
        body_fat_pct: row.get("body_fat_pct")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_profile(&self) -> RepoResult<Option<User>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<User>> {
                let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
                let user = conn
                    .query_row(&sql, params![DEFAULT_USER_ID], map_user)
                    .optional()?;
                Ok(user)
            })
            .await
    }

    async fn update_profile(&self, changes: UserChanges) -> RepoResult<Option<User>> {
        debug!("Updating profile");

        self.pool
            .run(move |conn| -> RepoResult<Option<User>> {
                let sql = format!(
                    "UPDATE users SET
                        name = COALESCE(?2, name),
                        birth_date = COALESCE(?3, birth_date),
                        height_cm = COALESCE(?4, height_cm),
                        weight_kg = COALESCE(?5, weight_kg),
                        body_fat_pct = COALESCE(?6, body_fat_pct),
                        updated_at = ?7
                     WHERE id = ?1
                     RETURNING {}",
                    USER_COLUMNS
                );
                let user = conn
                    .query_row(
                        &sql,
                        params![
                            DEFAULT_USER_ID,
                            changes.name,
                            changes.birth_date,
                            changes.height_cm,
                            changes.weight_kg,
                            changes.body_fat_pct,
                            Utc::now(),
                        ],
                        map_user,
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_profile_can_be_updated() {
        let repo = UserRepository::new(DatabasePool::in_memory().unwrap());
        let profile = repo.get_profile().await.unwrap().unwrap();
        assert_eq!(profile.id, DEFAULT_USER_ID);
        assert!(profile.weight_kg.is_none());

        let updated = repo
            .update_profile(UserChanges {
                weight_kg: Some(81.4),
                height_cm: Some(183),
                ..UserChanges::default()
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.weight_kg, Some(81.4));
        assert_eq!(updated.height_cm, Some(183));
        assert_eq!(updated.name, profile.name);
    }
}
