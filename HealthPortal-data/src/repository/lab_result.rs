use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::errors::RepoResult;
use super::DEFAULT_USER_ID;
use crate::database::DatabasePool;
use crate::models::{LabResult, LabResultChanges, NewLabResult};

const LAB_RESULT_COLUMNS: &str = "id, user_id, test_date, lab_name, marker_name, value, unit, \
     reference_min, reference_max, category, notes, created_at";

const INSERT_LAB_RESULT: &str = "INSERT INTO lab_results
        (user_id, test_date, lab_name, marker_name, value, unit,
         reference_min, reference_max, category, notes, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

/// Repository trait for lab results
#[async_trait]
pub trait LabResultRepositoryTrait: Send + Sync {
    /// List results, newest test first, optionally for one category
    async fn list(&self, category: Option<String>) -> RepoResult<Vec<LabResult>>;
    async fn get(&self, id: i64) -> RepoResult<Option<LabResult>>;
    async fn create(&self, new: NewLabResult) -> RepoResult<LabResult>;
    async fn update(&self, id: i64, changes: LabResultChanges) -> RepoResult<Option<LabResult>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    /// History of a single marker, newest first
    async fn list_by_marker(&self, marker_name: String) -> RepoResult<Vec<LabResult>>;

    /// Results that carry a value, grouped by marker and oldest first
    async fn list_with_values(&self) -> RepoResult<Vec<LabResult>>;

    /// Insert a batch in one transaction, returning the number of rows written
    async fn create_many(&self, batch: Vec<NewLabResult>) -> RepoResult<usize>;
}

#[derive(Debug, Clone)]
pub struct LabResultRepository {
    pool: DatabasePool,
}

impl LabResultRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_lab_result(row: &Row<'_>) -> rusqlite::Result<LabResult> {
    Ok(LabResult {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        test_date: row.get("test_date")?,
        lab_name: row.get("lab_name")?,
        marker_name: row.get("marker_name")?,
        value: row.get("value")?,
        unit: row.get("unit")?,
        reference_min: row.get("reference_min")?,
        reference_max: row.get("reference_max")?,
        category: row.get("category")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl LabResultRepositoryTrait for LabResultRepository {
    async fn list(&self, category: Option<String>) -> RepoResult<Vec<LabResult>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<LabResult>> {
                let sql = format!(
                    "SELECT {} FROM lab_results
                     WHERE user_id = ?1 AND (?2 IS NULL OR category = ?2)
                     ORDER BY test_date DESC, marker_name",
                    LAB_RESULT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let results = stmt
                    .query_map(params![DEFAULT_USER_ID, category], map_lab_result)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(results)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<LabResult>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<LabResult>> {
                let sql = format!("SELECT {} FROM lab_results WHERE id = ?1", LAB_RESULT_COLUMNS);
                let result = conn.query_row(&sql, params![id], map_lab_result).optional()?;
                Ok(result)
            })
            .await
    }

    async fn create(&self, new: NewLabResult) -> RepoResult<LabResult> {
        debug!("Creating lab result {} on {}", new.marker_name, new.test_date);

        self.pool
            .run(move |conn| -> RepoResult<LabResult> {
                let sql = format!("{} RETURNING {}", INSERT_LAB_RESULT, LAB_RESULT_COLUMNS);
                let result = conn.query_row(
                    &sql,
                    params![
                        DEFAULT_USER_ID,
                        new.test_date,
                        new.lab_name,
                        new.marker_name,
                        new.value,
                        new.unit,
                        new.reference_min,
                        new.reference_max,
                        new.category,
                        new.notes,
                        Utc::now(),
                    ],
                    map_lab_result,
                )?;
                Ok(result)
            })
            .await
    }

    async fn update(&self, id: i64, changes: LabResultChanges) -> RepoResult<Option<LabResult>> {
        debug!("Updating lab result {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<LabResult>> {
                let sql = format!(
                    "UPDATE lab_results SET
                        test_date = COALESCE(?2, test_date),
                        lab_name = COALESCE(?3, lab_name),
                        marker_name = COALESCE(?4, marker_name),
                        value = COALESCE(?5, value),
                        unit = COALESCE(?6, unit),
                        reference_min = COALESCE(?7, reference_min),
                        reference_max = COALESCE(?8, reference_max),
                        category = COALESCE(?9, category),
                        notes = COALESCE(?10, notes)
                     WHERE id = ?1
                     RETURNING {}",
                    LAB_RESULT_COLUMNS
                );
                let result = conn
                    .query_row(
                        &sql,
                        params![
                            id,
                            changes.test_date,
                            changes.lab_name,
                            changes.marker_name,
                            changes.value,
                            changes.unit,
                            changes.reference_min,
                            changes.reference_max,
                            changes.category,
                            changes.notes,
                        ],
                        map_lab_result,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute("DELETE FROM lab_results WHERE id = ?1", params![id])?;
                Ok(affected > 0)
            })
            .await
    }

    async fn list_by_marker(&self, marker_name: String) -> RepoResult<Vec<LabResult>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<LabResult>> {
                let sql = format!(
                    "SELECT {} FROM lab_results
                     WHERE user_id = ?1 AND marker_name = ?2
                     ORDER BY test_date DESC",
                    LAB_RESULT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let results = stmt
                    .query_map(params![DEFAULT_USER_ID, marker_name], map_lab_result)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(results)
            })
            .await
    }

    async fn list_with_values(&self) -> RepoResult<Vec<LabResult>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<LabResult>> {
                let sql = format!(
                    "SELECT {} FROM lab_results
                     WHERE user_id = ?1 AND value IS NOT NULL
                     ORDER BY marker_name, test_date ASC, id ASC",
                    LAB_RESULT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let results = stmt
                    .query_map(params![DEFAULT_USER_ID], map_lab_result)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(results)
            })
            .await
    }

    async fn create_many(&self, batch: Vec<NewLabResult>) -> RepoResult<usize> {
        info!("Importing {} lab results", batch.len());

        self.pool
            .run(move |conn| -> RepoResult<usize> {
                let now = Utc::now();
                let tx = conn.transaction()?;
                let mut inserted = 0;
                {
                    let mut stmt = tx.prepare(INSERT_LAB_RESULT)?;
                    for new in &batch {
                        inserted += stmt.execute(params![
                            DEFAULT_USER_ID,
                            new.test_date,
                            new.lab_name,
                            new.marker_name,
                            new.value,
                            new.unit,
                            new.reference_min,
                            new.reference_max,
                            new.category,
                            new.notes,
                            now,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(inserted)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn marker(name: &str, date: &str, value: Option<f64>) -> NewLabResult {
        NewLabResult {
            test_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            lab_name: Some("Invitro".to_string()),
            marker_name: name.to_string(),
            value,
            unit: Some("nmol/L".to_string()),
            reference_min: Some(8.0),
            reference_max: Some(29.0),
            category: Some("hormones".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_many_and_ordering() {
        let repo = LabResultRepository::new(DatabasePool::in_memory().unwrap());
        let inserted = repo
            .create_many(vec![
                marker("Testosterone Total", "2024-01-10", Some(18.2)),
                marker("Testosterone Total", "2024-03-10", Some(21.0)),
                marker("Estradiol", "2024-03-10", None),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].marker_name, "Estradiol");
        assert_eq!(all[2].test_date.to_string(), "2024-01-10");

        let with_values = repo.list_with_values().await.unwrap();
        assert_eq!(with_values.len(), 2);
        assert!(with_values[0].test_date < with_values[1].test_date);

        let history = repo.list_by_marker("Testosterone Total".to_string()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, Some(21.0));
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let repo = LabResultRepository::new(DatabasePool::in_memory().unwrap());
        let created = repo.create(marker("TSH", "2024-02-01", Some(2.1))).await.unwrap();

        let updated = repo
            .update(
                created.id,
                LabResultChanges {
                    value: Some(2.4),
                    ..LabResultChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.value, Some(2.4));
        assert_eq!(updated.marker_name, "TSH");
        assert_eq!(updated.reference_max, Some(29.0));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.update(created.id, LabResultChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let repo = LabResultRepository::new(DatabasePool::in_memory().unwrap());
        let mut glucose = marker("Glucose", "2024-02-01", Some(5.1));
        glucose.category = Some("metabolic".to_string());
        repo.create(glucose).await.unwrap();
        repo.create(marker("TSH", "2024-02-01", Some(2.1))).await.unwrap();

        let metabolic = repo.list(Some("metabolic".to_string())).await.unwrap();
        assert_eq!(metabolic.len(), 1);
        assert_eq!(metabolic[0].marker_name, "Glucose");
    }
}
