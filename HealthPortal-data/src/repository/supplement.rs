use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepoResult;
use super::DEFAULT_USER_ID;
use crate::database::DatabasePool;
use crate::models::supplement::{STATUS_ACTIVE, STATUS_REMOVED};
use crate::models::{NewSupplement, Supplement, SupplementChanges, SupplementFilter};

const SUPPLEMENT_COLUMNS: &str = "id, user_id, name, dose, time_of_day, category, mechanism, \
     target, status, evidence_level, notes, created_at, updated_at, removed_at";

/// Repository trait for supplements
#[async_trait]
pub trait SupplementRepositoryTrait: Send + Sync {
    /// List supplements, optionally filtered by status and category
    async fn list(&self, filter: SupplementFilter) -> RepoResult<Vec<Supplement>>;

    /// Get a supplement by ID
    async fn get(&self, id: i64) -> RepoResult<Option<Supplement>>;

    /// Insert a new active supplement
    async fn create(&self, new: NewSupplement) -> RepoResult<Supplement>;

    /// Apply a partial update, returning `None` when the ID is unknown
    async fn update(&self, id: i64, changes: SupplementChanges) -> RepoResult<Option<Supplement>>;

    /// Mark a supplement as removed
    async fn soft_delete(&self, id: i64) -> RepoResult<bool>;

    /// Active supplements that have a time slot
    async fn list_scheduled(&self) -> RepoResult<Vec<Supplement>>;

    /// All active supplements ordered by category
    async fn list_active(&self) -> RepoResult<Vec<Supplement>>;
}

/// SQLite-backed supplement repository
#[derive(Debug, Clone)]
pub struct SupplementRepository {
    pool: DatabasePool,
}

impl SupplementRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_supplement(row: &Row<'_>) -> rusqlite::Result<Supplement> {
    Ok(Supplement {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        dose: row.get("dose")?,
        time_of_day: row.get("time_of_day")?,
        category: row.get("category")?,
        mechanism: row.get("mechanism")?,
        target: row.get("target")?,
        status: row.get("status")?,
        evidence_level: row.get("evidence_level")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        removed_at: row.get("removed_at")?,
    })
}

#[async_trait]
impl SupplementRepositoryTrait for SupplementRepository {
    async fn list(&self, filter: SupplementFilter) -> RepoResult<Vec<Supplement>> {
        debug!("Listing supplements with filter {:?}", filter);

        self.pool
            .run(move |conn| -> RepoResult<Vec<Supplement>> {
                let sql = format!(
                    "SELECT {} FROM supplements
                     WHERE user_id = ?1
                       AND (?2 IS NULL OR status = ?2)
                       AND (?3 IS NULL OR category = ?3)
                     ORDER BY time_of_day IS NULL, time_of_day, name",
                    SUPPLEMENT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let supplements = stmt
                    .query_map(
                        params![DEFAULT_USER_ID, filter.status, filter.category],
                        map_supplement,
                    )?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(supplements)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<Supplement>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Supplement>> {
                let sql = format!("SELECT {} FROM supplements WHERE id = ?1", SUPPLEMENT_COLUMNS);
                let supplement = conn
                    .query_row(&sql, params![id], map_supplement)
                    .optional()?;
                Ok(supplement)
            })
            .await
    }

    async fn create(&self, new: NewSupplement) -> RepoResult<Supplement> {
        debug!("Creating supplement {}", new.name);

        self.pool
            .run(move |conn| -> RepoResult<Supplement> {
                let now = Utc::now();
                let sql = format!(
                    "INSERT INTO supplements
                        (user_id, name, dose, time_of_day, category, mechanism, target,
                         status, evidence_level, notes, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                     RETURNING {}",
                    SUPPLEMENT_COLUMNS
                );
                let supplement = conn.query_row(
                    &sql,
                    params![
                        DEFAULT_USER_ID,
                        new.name,
                        new.dose,
                        new.time_of_day,
                        new.category,
                        new.mechanism,
                        new.target,
                        STATUS_ACTIVE,
                        new.evidence_level,
                        new.notes,
                        now,
                    ],
                    map_supplement,
                )?;
                Ok(supplement)
            })
            .await
    }

    async fn update(&self, id: i64, changes: SupplementChanges) -> RepoResult<Option<Supplement>> {
        debug!("Updating supplement {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Supplement>> {
                let sql = format!(
                    "UPDATE supplements SET
                        name = COALESCE(?2, name),
                        dose = COALESCE(?3, dose),
                        time_of_day = COALESCE(?4, time_of_day),
                        category = COALESCE(?5, category),
                        mechanism = COALESCE(?6, mechanism),
                        target = COALESCE(?7, target),
                        status = COALESCE(?8, status),
                        evidence_level = COALESCE(?9, evidence_level),
                        notes = COALESCE(?10, notes),
                        updated_at = ?11
                     WHERE id = ?1
                     RETURNING {}",
                    SUPPLEMENT_COLUMNS
                );
                let supplement = conn
                    .query_row(
                        &sql,
                        params![
                            id,
                            changes.name,
                            changes.dose,
                            changes.time_of_day,
                            changes.category,
                            changes.mechanism,
                            changes.target,
                            changes.status,
                            changes.evidence_level,
                            changes.notes,
                            Utc::now(),
                        ],
                        map_supplement,
                    )
                    .optional()?;
                Ok(supplement)
            })
            .await
    }

    async fn soft_delete(&self, id: i64) -> RepoResult<bool> {
        debug!("Soft deleting supplement {}", id);

        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let now = Utc::now();
                let affected = conn.execute(
                    "UPDATE supplements SET status = ?2, removed_at = ?3, updated_at = ?3 WHERE id = ?1",
                    params![id, STATUS_REMOVED, now],
                )?;
                Ok(affected > 0)
            })
            .await
    }

    async fn list_scheduled(&self) -> RepoResult<Vec<Supplement>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Supplement>> {
                let sql = format!(
                    "SELECT {} FROM supplements
                     WHERE user_id = ?1 AND status = ?2 AND time_of_day IS NOT NULL
                     ORDER BY time_of_day, name",
                    SUPPLEMENT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let supplements = stmt
                    .query_map(params![DEFAULT_USER_ID, STATUS_ACTIVE], map_supplement)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(supplements)
            })
            .await
    }

    async fn list_active(&self) -> RepoResult<Vec<Supplement>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Supplement>> {
                let sql = format!(
                    "SELECT {} FROM supplements
                     WHERE user_id = ?1 AND status = ?2
                     ORDER BY category IS NULL, category, time_of_day IS NULL, time_of_day, name",
                    SUPPLEMENT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let supplements = stmt
                    .query_map(params![DEFAULT_USER_ID, STATUS_ACTIVE], map_supplement)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(supplements)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_supplement(name: &str, time_of_day: Option<&str>, category: Option<&str>) -> NewSupplement {
        NewSupplement {
            name: name.to_string(),
            dose: Some("1 cap".to_string()),
            time_of_day: time_of_day.map(str::to_string),
            category: category.map(str::to_string),
            ..NewSupplement::default()
        }
    }

    fn repository() -> SupplementRepository {
        SupplementRepository::new(DatabasePool::in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repository();
        let created = repo
            .create(new_supplement("Magnesium", Some("evening"), Some("minerals")))
            .await
            .unwrap();

        assert_eq!(created.status, "active");
        assert_eq!(created.user_id, DEFAULT_USER_ID);
        assert!(created.removed_at.is_none());

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let repo = repository();
        let created = repo
            .create(new_supplement("Zinc", Some("morning"), Some("minerals")))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                SupplementChanges {
                    dose: Some("25 mg".to_string()),
                    ..SupplementChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.dose.as_deref(), Some("25 mg"));
        assert_eq!(updated.name, "Zinc");
        assert_eq!(updated.time_of_day.as_deref(), Some("morning"));
        assert_eq!(updated.category.as_deref(), Some("minerals"));
        assert!(updated.updated_at >= created.updated_at);

        let missing = repo.update(999, SupplementChanges::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_soft_delete_marks_removed() {
        let repo = repository();
        let created = repo.create(new_supplement("Iron", None, None)).await.unwrap();

        assert!(repo.soft_delete(created.id).await.unwrap());
        assert!(!repo.soft_delete(999).await.unwrap());

        let removed = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(removed.status, "removed");
        assert!(removed.removed_at.is_some());
        assert!(repo.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_and_ordering() {
        let repo = repository();
        repo.create(new_supplement("Vitamin D", Some("morning"), Some("vitamins")))
            .await
            .unwrap();
        repo.create(new_supplement("Ashwagandha", Some("evening"), Some("adaptogens")))
            .await
            .unwrap();
        repo.create(new_supplement("Creatine", None, None)).await.unwrap();

        let all = repo.list(SupplementFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ashwagandha", "Vitamin D", "Creatine"]);

        let vitamins = repo
            .list(SupplementFilter {
                category: Some("vitamins".to_string()),
                ..SupplementFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(vitamins.len(), 1);
        assert_eq!(vitamins[0].name, "Vitamin D");

        let scheduled = repo.list_scheduled().await.unwrap();
        assert_eq!(scheduled.len(), 2);
    }
}
