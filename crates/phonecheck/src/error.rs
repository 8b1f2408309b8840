use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the server. Reference and log store problems are
/// handled at startup and never surface here.
#[derive(Error, Debug)]
pub enum PhonecheckError {
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log store setting '{value}': {reason}")]
    InvalidLogStore { value: String, reason: String },

    #[error("Unsupported log store scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("Invalid bind address '{value}': {reason}")]
    InvalidBind { value: String, reason: String },
}

/// Failure to load one of the reference CSV files. Never fatal: the
/// affected lookup structure is left empty.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Reference file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read reference file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Reference file '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Malformed record in '{path}' at line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

#[derive(Error, Debug)]
pub enum LogStoreError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("Failed to access call log file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed call log file '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid timestamp '{value}' in call log")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Call log unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Call log lock poisoned")]
    LockPoisoned,

    #[error("Call log task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, PhonecheckError>;
