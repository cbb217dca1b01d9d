// Repository module structure
pub mod errors;
mod cycle;
mod goal;
mod interaction;
mod lab_result;
mod reminder;
mod supplement;
mod user;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

// Re-export commonly used types
pub use crate::database::migrations::DEFAULT_USER_ID;
pub use cycle::{CycleRepository, CycleRepositoryTrait};
pub use errors::{RepoResult, RepositoryError};
pub use goal::{GoalRepository, GoalRepositoryTrait};
pub use interaction::{InteractionRepository, InteractionRepositoryTrait};
pub use lab_result::{LabResultRepository, LabResultRepositoryTrait};
pub use reminder::{ReminderRepository, ReminderRepositoryTrait};
pub use supplement::{SupplementRepository, SupplementRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};

/// Read a nullable TEXT column holding JSON
pub(crate) fn json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    column: &str,
) -> rusqlite::Result<Option<T>> {
    let text: Option<String> = row.get(column)?;
    match text {
        None => Ok(None),
        Some(text) => serde_json::from_str(&text).map(Some).map_err(|e| {
            let index = row.as_ref().column_index(column).unwrap_or_default();
            rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
        }),
    }
}

/// Encode an optional value for a JSON TEXT column
pub(crate) fn json_text<T: Serialize>(value: Option<&T>) -> RepoResult<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(RepositoryError::from)
}
