use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepoResult;
use super::DEFAULT_USER_ID;
use crate::database::DatabasePool;
use crate::models::{Goal, GoalChanges, NewGoal};

const GOAL_COLUMNS: &str = "id, user_id, name, current_value, target_value, strategy, priority, \
     status, created_at, updated_at";

/// Repository trait for goals
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// All goals, most urgent priority first
    async fn list(&self) -> RepoResult<Vec<Goal>>;
    async fn get(&self, id: i64) -> RepoResult<Option<Goal>>;
    async fn create(&self, new: NewGoal) -> RepoResult<Goal>;
    async fn update(&self, id: i64, changes: GoalChanges) -> RepoResult<Option<Goal>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: DatabasePool,
}

impl GoalRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_goal(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        current_value: row.get("current_value")?,
        target_value: row.get("target_value")?,
        strategy: row.get("strategy")?,
        priority: row.get("priority")?,
        status: row.get("status")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn list(&self) -> RepoResult<Vec<Goal>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Goal>> {
                let sql = format!(
                    "SELECT {} FROM goals
                     WHERE user_id = ?1
                     ORDER BY
                        CASE priority
                            WHEN 'critical' THEN 1
                            WHEN 'high' THEN 2
                            WHEN 'medium' THEN 3
                            WHEN 'background' THEN 4
                            ELSE 5
                        END,
                        name",
                    GOAL_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let goals = stmt
                    .query_map(params![DEFAULT_USER_ID], map_goal)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(goals)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<Goal>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Goal>> {
                let sql = format!("SELECT {} FROM goals WHERE id = ?1", GOAL_COLUMNS);
                let goal = conn.query_row(&sql, params![id], map_goal).optional()?;
                Ok(goal)
            })
            .await
    }

    async fn create(&self, new: NewGoal) -> RepoResult<Goal> {
        debug!("Creating goal {}", new.name);

        self.pool
            .run(move |conn| -> RepoResult<Goal> {
                let sql = format!(
                    "INSERT INTO goals
                        (user_id, name, current_value, target_value, strategy, priority,
                         status, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active', ?7, ?7)
                     RETURNING {}",
                    GOAL_COLUMNS
                );
                let goal = conn.query_row(
                    &sql,
                    params![
                        DEFAULT_USER_ID,
                        new.name,
                        new.current_value,
                        new.target_value,
                        new.strategy,
                        new.priority,
                        Utc::now(),
                    ],
                    map_goal,
                )?;
                Ok(goal)
            })
            .await
    }

    async fn update(&self, id: i64, changes: GoalChanges) -> RepoResult<Option<Goal>> {
        debug!("Updating goal {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Goal>> {
                let sql = format!(
                    "UPDATE goals SET
                        name = COALESCE(?2, name),
                        current_value = COALESCE(?3, current_value),
                        target_value = COALESCE(?4, target_value),
                        strategy = COALESCE(?5, strategy),
                        priority = COALESCE(?6, priority),
                        status = COALESCE(?7, status),
                        updated_at = ?8
                     WHERE id = ?1
                     RETURNING {}",
                    GOAL_COLUMNS
                );
                let goal = conn
                    .query_row(
                        &sql,
                        params![
                            id,
                            changes.name,
                            changes.current_value,
                            changes.target_value,
                            changes.strategy,
                            changes.priority,
                            changes.status,
                            Utc::now(),
                        ],
                        map_goal,
                    )
                    .optional()?;
                Ok(goal)
            })
            .await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        debug!("Deleting goal {}", id);

        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute("DELETE FROM goals WHERE id = ?1", params![id])?;
                Ok(affected > 0)
            })
            .await
    }
}
