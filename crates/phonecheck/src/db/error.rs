//! Database error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from call log database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the directory that holds the database file failed.
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    #[error("Database lock poisoned")]
    LockPoisoned,
}
