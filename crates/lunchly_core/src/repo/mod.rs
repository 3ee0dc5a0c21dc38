//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for customers and
//!   reservations.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every statement binds values positionally; no value is ever
//!   interpolated into SQL text.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use thiserror::Error;

pub mod customer_repo;
pub mod reservation_repo;
mod schema;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    #[error("{0}")]
    Db(#[from] DbError),
    /// Update targeted a row id that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    /// Connection schema is not at the expected migrated version.
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a valid entity.
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
