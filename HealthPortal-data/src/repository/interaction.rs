use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::errors::{RepoResult, RepositoryError};
use crate::database::DatabasePool;
use crate::models::{Interaction, InteractionChanges, NewInteraction};

const SELECT_INTERACTIONS: &str = "SELECT i.id, i.supplement_1_id, i.supplement_2_id,
        i.interaction_type, i.description, i.solution, i.created_at,
        s1.name AS supplement_1_name, s2.name AS supplement_2_name
     FROM interactions i
     JOIN supplements s1 ON s1.id = i.supplement_1_id
     JOIN supplements s2 ON s2.id = i.supplement_2_id";

/// Repository trait for supplement interactions
#[async_trait]
pub trait InteractionRepositoryTrait: Send + Sync {
    /// List interactions, most severe first
    async fn list(&self, interaction_type: Option<String>) -> RepoResult<Vec<Interaction>>;
    async fn get(&self, id: i64) -> RepoResult<Option<Interaction>>;
    async fn create(&self, new: NewInteraction) -> RepoResult<Interaction>;
    async fn update(&self, id: i64, changes: InteractionChanges) -> RepoResult<Option<Interaction>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, Clone)]
pub struct InteractionRepository {
    pool: DatabasePool,
}

impl InteractionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_interaction(row: &Row<'_>) -> rusqlite::Result<Interaction> {
    Ok(Interaction {
        id: row.get("id")?,
        supplement_1_id: row.get("supplement_1_id")?,
        supplement_2_id: row.get("supplement_2_id")?,
        interaction_type: row.get("interaction_type")?,
        description: row.get("description")?,
        solution: row.get("solution")?,
        created_at: row.get("created_at")?,
        supplement_1_name: row.get("supplement_1_name")?,
        supplement_2_name: row.get("supplement_2_name")?,
    })
}

fn find_by_id(conn: &Connection, id: i64) -> RepoResult<Option<Interaction>> {
    let sql = format!("{} WHERE i.id = ?1", SELECT_INTERACTIONS);
    let interaction = conn.query_row(&sql, params![id], map_interaction).optional()?;
    Ok(interaction)
}

#[async_trait]
impl InteractionRepositoryTrait for InteractionRepository {
    async fn list(&self, interaction_type: Option<String>) -> RepoResult<Vec<Interaction>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Interaction>> {
                let sql = format!(
                    "{}
                     WHERE (?1 IS NULL OR i.interaction_type = ?1)
                     ORDER BY
                        CASE i.interaction_type
                            WHEN 'critical' THEN 1
                            WHEN 'warning' THEN 2
                            WHEN 'synergy' THEN 3
                            ELSE 4
                        END,
                        i.created_at DESC",
                    SELECT_INTERACTIONS
                );
                let mut stmt = conn.prepare(&sql)?;
                let interactions = stmt
                    .query_map(params![interaction_type], map_interaction)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(interactions)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<Interaction>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Interaction>> { find_by_id(conn, id) })
            .await
    }

    async fn create(&self, new: NewInteraction) -> RepoResult<Interaction> {
        debug!(
            "Creating interaction between supplements {} and {}",
            new.supplement_1_id, new.supplement_2_id
        );

        self.pool
            .run(move |conn| -> RepoResult<Interaction> {
                let id: i64 = conn.query_row(
                    "INSERT INTO interactions
                        (supplement_1_id, supplement_2_id, interaction_type, description, solution, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     RETURNING id",
                    params![
                        new.supplement_1_id,
                        new.supplement_2_id,
                        new.interaction_type,
                        new.description,
                        new.solution,
                        Utc::now(),
                    ],
                    |row| row.get(0),
                )?;
                find_by_id(conn, id)?
                    .ok_or_else(|| RepositoryError::NotFound(format!("interaction {}", id)))
            })
            .await
    }

    async fn update(&self, id: i64, changes: InteractionChanges) -> RepoResult<Option<Interaction>> {
        debug!("Updating interaction {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Interaction>> {
                let affected = conn.execute(
                    "UPDATE interactions SET
                        interaction_type = COALESCE(?2, interaction_type),
                        description = COALESCE(?3, description),
                        solution = COALESCE(?4, solution)
                     WHERE id = ?1",
                    params![id, changes.interaction_type, changes.description, changes.solution],
                )?;
                if affected == 0 {
                    return Ok(None);
                }
                find_by_id(conn, id)
            })
            .await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute("DELETE FROM interactions WHERE id = ?1", params![id])?;
                Ok(affected > 0)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSupplement, SupplementFilter};
    use crate::repository::{SupplementRepository, SupplementRepositoryTrait};

    async fn seed_supplements(pool: &DatabasePool) -> (i64, i64, i64) {
        let supplements = SupplementRepository::new(pool.clone());
        let mut ids = Vec::new();
        for name in ["Zinc", "Copper", "Iron"] {
            let created = supplements
                .create(NewSupplement {
                    name: name.to_string(),
                    ..NewSupplement::default()
                })
                .await
                .unwrap();
            ids.push(created.id);
        }
        (ids[0], ids[1], ids[2])
    }

    fn interaction(a: i64, b: i64, kind: &str) -> NewInteraction {
        NewInteraction {
            supplement_1_id: a,
            supplement_2_id: b,
            interaction_type: Some(kind.to_string()),
            description: Some("competes for absorption".to_string()),
            solution: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_joined_names() {
        let pool = DatabasePool::in_memory().unwrap();
        let (zinc, copper, _) = seed_supplements(&pool).await;
        let repo = InteractionRepository::new(pool);

        let created = repo.create(interaction(zinc, copper, "warning")).await.unwrap();
        assert_eq!(created.supplement_1_name, "Zinc");
        assert_eq!(created.supplement_2_name, "Copper");

        let updated = repo
            .update(
                created.id,
                InteractionChanges {
                    solution: Some("take 4h apart".to_string()),
                    ..InteractionChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.solution.as_deref(), Some("take 4h apart"));
        assert_eq!(updated.description.as_deref(), Some("competes for absorption"));
        assert_eq!(updated.supplement_1_name, "Zinc");
    }

    #[tokio::test]
    async fn test_list_orders_by_severity() {
        let pool = DatabasePool::in_memory().unwrap();
        let (zinc, copper, iron) = seed_supplements(&pool).await;
        let repo = InteractionRepository::new(pool);

        repo.create(interaction(zinc, iron, "synergy")).await.unwrap();
        repo.create(interaction(zinc, copper, "critical")).await.unwrap();
        repo.create(interaction(copper, iron, "warning")).await.unwrap();

        let kinds: Vec<_> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|i| i.interaction_type)
            .collect();
        assert_eq!(kinds, vec!["critical", "warning", "synergy"]);

        let critical = repo.list(Some("critical".to_string())).await.unwrap();
        assert_eq!(critical.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_supplement_is_validation_error() {
        let pool = DatabasePool::in_memory().unwrap();
        let (zinc, _, _) = seed_supplements(&pool).await;
        let repo = InteractionRepository::new(pool);

        let err = repo.create(interaction(zinc, 999, "warning")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deleting_supplement_cascades() {
        let pool = DatabasePool::in_memory().unwrap();
        let (zinc, copper, _) = seed_supplements(&pool).await;
        let repo = InteractionRepository::new(pool.clone());
        repo.create(interaction(zinc, copper, "warning")).await.unwrap();

        pool.run(move |conn| -> RepoResult<()> {
            conn.execute("DELETE FROM supplements WHERE id = ?1", params![zinc])?;
            Ok(())
        })
        .await
        .unwrap();

        assert!(repo.list(None).await.unwrap().is_empty());
        let remaining = SupplementRepository::new(pool)
            .list(SupplementFilter::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
    }
}
