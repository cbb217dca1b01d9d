//! Database connection module for the Health Portal backend
//!
//! SQLite is the only supported backend. Connections are pooled with r2d2 and
//! every statement runs on Tokio's blocking thread pool through
//! [`DatabasePool::run`].

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use tracing::{error, info, warn};

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Default location of the SQLite database file
pub const DEFAULT_SQLITE_PATH: &str = "data/health_portal.db";

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// SQLite database (file-based)
    Sqlite,
}

impl FromStr for DatabaseType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseType::Sqlite),
            _ => Err(DatabaseError::UnsupportedDatabaseType(s.to_string())),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database type
    pub db_type: DatabaseType,
    /// Path to SQLite database file
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let db_type = env::var("DB_TYPE")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse::<DatabaseType>()?;

        let sqlite_path = env::var("DB_SQLITE_PATH").unwrap_or_else(|_| {
            info!("No DB_SQLITE_PATH provided, using default path: {}", DEFAULT_SQLITE_PATH);
            DEFAULT_SQLITE_PATH.to_string()
        });

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        if max_connections == 0 {
            return Err(DatabaseError::ConfigError(
                "DB_MAX_CONNECTIONS must be greater than zero".to_string(),
            ));
        }

        info!(
            "Database configuration: path={}, max_connections={}, timeout={}s",
            sqlite_path, max_connections, timeout_seconds
        );

        Ok(DatabaseConfig {
            db_type,
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

/// Pooled SQLite connections shared by every repository
#[derive(Clone)]
pub struct DatabasePool {
    pool: r2d2::Pool<SqliteConnectionManager>,
    location: String,
}

impl fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("DatabasePool")
            .field("location", &self.location)
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl DatabasePool {
    /// Create a single-connection in-memory database with the schema applied
    pub fn in_memory() -> Result<Self, DatabaseError> {
        info!("Initializing in-memory SQLite database");

        let manager = SqliteConnectionManager::memory().with_init(enable_foreign_keys);

        // Every in-memory connection is its own database, so the pool must
        // never open a second one.
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)?;

        let conn = pool.get()?;
        run_sqlite_migrations(&conn)?;
        drop(conn);

        Ok(Self {
            pool,
            location: ":memory:".to_string(),
        })
    }

    /// Run a closure against a pooled connection on the blocking thread pool
    pub async fn run<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DatabaseError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DatabaseError::from)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| E::from(DatabaseError::TaskError(e.to_string())))?
    }

    /// Where the database lives (file path or `:memory:`)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Whether the database is held in memory
    pub fn is_in_memory(&self) -> bool {
        self.location == ":memory:"
    }

    /// Execute a trivial query to verify the database answers
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.run(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    /// Get information about the current database connection
    pub fn get_connection_info(&self) -> String {
        let state = self.pool.state();
        let description = if self.is_in_memory() {
            "SQLite in-memory database".to_string()
        } else {
            format!("SQLite database at {}", self.location)
        };

        format!(
            "{} (connections: active={}, idle={})",
            description, state.connections, state.idle_connections
        )
    }
}

fn enable_foreign_keys(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// Initialize the database connection pool and run migrations
pub fn initialize_database_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing database pool with type: {:?}", config.db_type);

    match config.db_type {
        DatabaseType::Sqlite => initialize_sqlite_pool(config),
    }
}

/// Initialize SQLite connection pool
fn initialize_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let sqlite_path = &config.sqlite_path;
    info!("Initializing SQLite database at: {}", sqlite_path);

    if let Some(parent) = Path::new(sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return DatabasePool::in_memory();
            }
        }
    }

    let manager = SqliteConnectionManager::file(sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(enable_foreign_keys);

    let pool = match r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create SQLite connection pool: {}", e);
            warn!("Falling back to in-memory SQLite database");
            return DatabasePool::in_memory();
        }
    };

    let conn = pool.get()?;
    run_sqlite_migrations(&conn)?;
    drop(conn);

    info!("SQLite connection pool created successfully");
    Ok(DatabasePool {
        pool,
        location: sqlite_path.clone(),
    })
}
