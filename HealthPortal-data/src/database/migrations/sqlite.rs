use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::database::DatabaseError;

/// Id of the single implicit user every row belongs to
pub const DEFAULT_USER_ID: i64 = 1;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_users_table(conn)?;
    create_supplements_table(conn)?;
    create_goals_table(conn)?;
    create_lab_results_table(conn)?;
    create_interactions_table(conn)?;
    create_reminders_table(conn)?;
    create_cycles_table(conn)?;
    create_indexes(conn)?;
    seed_default_user(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

fn execute(conn: &Connection, table: &str, sql: &str) -> Result<(), DatabaseError> {
    debug!("Creating {} if not exists", table);
    conn.execute_batch(sql)
        .map_err(|e| DatabaseError::MigrationError(format!("Failed to create {}: {}", table, e)))
}

fn create_users_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            birth_date TEXT,
            height_cm INTEGER,
            weight_kg REAL,
            body_fat_pct REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

fn create_supplements_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "supplements",
        "CREATE TABLE IF NOT EXISTS supplements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id),
            name TEXT NOT NULL,
            dose TEXT,
            time_of_day TEXT,
            category TEXT,
            mechanism TEXT,
            target TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            evidence_level TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            removed_at TEXT
        );",
    )
}

fn create_goals_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "goals",
        "CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id),
            name TEXT NOT NULL,
            current_value TEXT,
            target_value TEXT,
            strategy TEXT,
            priority TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

fn create_lab_results_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "lab_results",
        "CREATE TABLE IF NOT EXISTS lab_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id),
            test_date TEXT NOT NULL,
            lab_name TEXT,
            marker_name TEXT NOT NULL,
            value REAL,
            unit TEXT,
            reference_min REAL,
            reference_max REAL,
            category TEXT,
            notes TEXT,
            created_at TEXT NOT NULL
        );",
    )
}

fn create_interactions_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "interactions",
        "CREATE TABLE IF NOT EXISTS interactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            supplement_1_id INTEGER NOT NULL REFERENCES supplements(id) ON DELETE CASCADE,
            supplement_2_id INTEGER NOT NULL REFERENCES supplements(id) ON DELETE CASCADE,
            interaction_type TEXT,
            description TEXT,
            solution TEXT,
            created_at TEXT NOT NULL
        );",
    )
}

fn create_reminders_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "reminders",
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id),
            reminder_type TEXT,
            title TEXT NOT NULL,
            description TEXT,
            time TEXT,
            days_of_week TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );",
    )
}

fn create_cycles_table(conn: &Connection) -> Result<(), DatabaseError> {
    execute(
        conn,
        "cycles",
        "CREATE TABLE IF NOT EXISTS cycles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id),
            cycle_date TEXT NOT NULL,
            cycle_type TEXT,
            verdict TEXT,
            input_data TEXT,
            rsl_output TEXT,
            master_curator_output TEXT,
            red_team_output TEXT,
            meta_supervisor_output TEXT,
            decisions TEXT,
            required_labs TEXT,
            next_review_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

/// Create indexes for the common filters and orderings
fn create_indexes(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating indexes");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_supplements_status ON supplements (status);
        CREATE INDEX IF NOT EXISTS idx_supplements_category ON supplements (category);
        CREATE INDEX IF NOT EXISTS idx_goals_status ON goals (status);
        CREATE INDEX IF NOT EXISTS idx_lab_results_marker ON lab_results (marker_name);
        CREATE INDEX IF NOT EXISTS idx_lab_results_test_date ON lab_results (test_date DESC);
        CREATE INDEX IF NOT EXISTS idx_lab_results_category ON lab_results (category);
        CREATE INDEX IF NOT EXISTS idx_interactions_supplements ON interactions (supplement_1_id, supplement_2_id);
        CREATE INDEX IF NOT EXISTS idx_reminders_active ON reminders (is_active);
        CREATE INDEX IF NOT EXISTS idx_cycles_date ON cycles (cycle_date DESC);",
    )
    .map_err(|e| DatabaseError::MigrationError(format!("Failed to create index: {}", e)))
}

/// Insert the implicit user unless it already exists
fn seed_default_user(conn: &Connection) -> Result<(), DatabaseError> {
    let now = Utc::now();
    conn.execute(
        "INSERT OR IGNORE INTO users (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        params![DEFAULT_USER_ID, "Default User", now],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("Failed to seed default user: {}", e)))?;

    Ok(())
}
