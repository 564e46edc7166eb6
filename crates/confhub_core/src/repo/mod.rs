//! Directory contracts and persistence gateways.
//!
//! # Responsibility
//! - Define the narrow room/user directory interfaces the engine consumes.
//! - Provide in-memory and SQLite implementations of those interfaces.
//! - Persist and reload event snapshots.
//!
//! # Invariants
//! - Gateways return semantic errors (`InvalidData`) in addition to DB
//!   transport errors; they never mask malformed persisted rows.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod directory;
pub mod event_repo;
pub mod sqlite_directory;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by directory and event gateways.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "gateway requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
