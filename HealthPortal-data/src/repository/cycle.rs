use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepoResult;
use super::{json_column, json_text, DEFAULT_USER_ID};
use crate::database::DatabasePool;
use crate::models::{Cycle, CycleChanges, NewCycle, StageOutputs};

const CYCLE_COLUMNS: &str = "id, user_id, cycle_date, cycle_type, verdict, input_data, rsl_output, \
     master_curator_output, red_team_output, meta_supervisor_output, decisions, required_labs, \
     next_review_date, created_at, updated_at";

/// Maximum number of cycles returned by `list`
const LIST_LIMIT: i64 = 50;

/// Repository trait for review cycles
#[async_trait]
pub trait CycleRepositoryTrait: Send + Sync {
    /// Most recent cycles first
    async fn list(&self) -> RepoResult<Vec<Cycle>>;
    async fn get(&self, id: i64) -> RepoResult<Option<Cycle>>;
    async fn latest(&self) -> RepoResult<Option<Cycle>>;
    async fn create(&self, new: NewCycle) -> RepoResult<Cycle>;
    async fn update(&self, id: i64, changes: CycleChanges) -> RepoResult<Option<Cycle>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    /// Store stage outputs, leaving absent ones untouched
    async fn save_analysis(&self, id: i64, outputs: StageOutputs) -> RepoResult<bool>;
}

#[derive(Debug, Clone)]
pub struct CycleRepository {
    pool: DatabasePool,
}

impl CycleRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_cycle(row: &Row<'_>) -> rusqlite::Result<Cycle> {
    Ok(Cycle {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        cycle_date: row.get("cycle_date")?,
        cycle_type: row.get("cycle_type")?,
        verdict: row.get("verdict")?,
        input_data: json_column(row, "input_data")?,
        rsl_output: row.get("rsl_output")?,
        master_curator_output: row.get("master_curator_output")?,
        red_team_output: row.get("red_team_output")?,
        meta_supervisor_output: row.get("meta_supervisor_output")?,
        decisions: json_column(row, "decisions")?,
        required_labs: json_column(row, "required_labs")?,
        next_review_date: row.get("next_review_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[async_trait]
impl CycleRepositoryTrait for CycleRepository {
    async fn list(&self) -> RepoResult<Vec<Cycle>> {
        self.pool
            .run(move |conn| -> RepoResult<Vec<Cycle>> {
                let sql = format!(
                    "SELECT {} FROM cycles
                     WHERE user_id = ?1
                     ORDER BY cycle_date DESC, id DESC
                     LIMIT ?2",
                    CYCLE_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let cycles = stmt
                    .query_map(params![DEFAULT_USER_ID, LIST_LIMIT], map_cycle)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(cycles)
            })
            .await
    }

    async fn get(&self, id: i64) -> RepoResult<Option<Cycle>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Cycle>> {
                let sql = format!("SELECT {} FROM cycles WHERE id = ?1", CYCLE_COLUMNS);
                let cycle = conn.query_row(&sql, params![id], map_cycle).optional()?;
                Ok(cycle)
            })
            .await
    }

    async fn latest(&self) -> RepoResult<Option<Cycle>> {
        self.pool
            .run(move |conn| -> RepoResult<Option<Cycle>> {
                let sql = format!(
                    "SELECT {} FROM cycles
                     WHERE user_id = ?1
                     ORDER BY cycle_date DESC, id DESC
                     LIMIT 1",
                    CYCLE_COLUMNS
                );
                let cycle = conn
                    .query_row(&sql, params![DEFAULT_USER_ID], map_cycle)
                    .optional()?;
                Ok(cycle)
            })
            .await
    }

    async fn create(&self, new: NewCycle) -> RepoResult<Cycle> {
        debug!("Creating cycle for {}", new.cycle_date);

        self.pool
            .run(move |conn| -> RepoResult<Cycle> {
                let input_data = json_text(new.input_data.as_ref())?;
                let sql = format!(
                    "INSERT INTO cycles
                        (user_id, cycle_date, cycle_type, input_data, next_review_date, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                     RETURNING {}",
                    CYCLE_COLUMNS
                );
                let cycle = conn.query_row(
                    &sql,
                    params![
                        DEFAULT_USER_ID,
                        new.cycle_date,
                        new.cycle_type,
                        input_data,
                        new.next_review_date,
                        Utc::now(),
                    ],
                    map_cycle,
                )?;
                Ok(cycle)
            })
            .await
    }

    async fn update(&self, id: i64, changes: CycleChanges) -> RepoResult<Option<Cycle>> {
        debug!("Updating cycle {}", id);

        self.pool
            .run(move |conn| -> RepoResult<Option<Cycle>> {
                let decisions = json_text(changes.decisions.as_ref())?;
                let required_labs = json_text(changes.required_labs.as_ref())?;
                let sql = format!(
                    "UPDATE cycles SET
                        verdict = COALESCE(?2, verdict),
                        rsl_output = COALESCE(?3, rsl_output),
                        master_curator_output = COALESCE(?4, master_curator_output),
                        red_team_output = COALESCE(?5, red_team_output),
                        meta_supervisor_output = COALESCE(?6, meta_supervisor_output),
                        decisions = COALESCE(?7, decisions),
                        required_labs = COALESCE(?8, required_labs),
                        next_review_date = COALESCE(?9, next_review_date),
                        updated_at = ?10
                     WHERE id = ?1
                     RETURNING {}",
                    CYCLE_COLUMNS
                );
                let cycle = conn
                    .query_row(
                        &sql,
                        params![
                            id,
                            changes.verdict,
                            changes.rsl_output,
                            changes.master_curator_output,
                            changes.red_team_output,
                            changes.meta_supervisor_output,
                            decisions,
                            required_labs,
                            changes.next_review_date,
                            Utc::now(),
                        ],
                        map_cycle,
                    )
                    .optional()?;
                Ok(cycle)
            })
            .await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute("DELETE FROM cycles WHERE id = ?1", params![id])?;
                Ok(affected > 0)
            })
            .await
    }

    async fn save_analysis(&self, id: i64, outputs: StageOutputs) -> RepoResult<bool> {
        debug!("Saving analysis results for cycle {}", id);

        self.pool
            .run(move |conn| -> RepoResult<bool> {
                let affected = conn.execute(
                    "UPDATE cycles SET
                        rsl_output = COALESCE(?2, rsl_output),
                        master_curator_output = COALESCE(?3, master_curator_output),
                        red_team_output = COALESCE(?4, red_team_output),
                        meta_supervisor_output = COALESCE(?5, meta_supervisor_output),
                        updated_at = ?6
                     WHERE id = ?1",
                    params![
                        id,
                        outputs.rsl_output,
                        outputs.master_curator_output,
                        outputs.red_team_output,
                        outputs.meta_supervisor_output,
                        Utc::now(),
                    ],
                )?;
                Ok(affected > 0)
            })
            .await
    }
}
