// Database migrations module
// Schema is SQLite only; every statement is idempotent.

mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
pub use sqlite::DEFAULT_USER_ID;
