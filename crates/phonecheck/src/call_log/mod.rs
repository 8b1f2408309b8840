//! Append-only log of check requests.
//!
//! Three interchangeable backends implement [`CallLogStore`]: a SQLite
//! table, a flat CSV file, and a disabled store for deployments without
//! durable storage. Records are never updated or deleted.

pub mod csv_file;
pub mod disabled;
pub mod sqlite;

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::config::LogStoreConfig;
use crate::db::Database;
use crate::error::LogStoreError;

pub use csv_file::CsvCallLog;
pub use disabled::DisabledCallLog;
pub use sqlite::SqliteCallLog;

/// Timestamp layout used for storage and for API output.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Stored in `msg` when the caller sent no message.
pub const DEFAULT_MESSAGE: &str = "list check only";
/// Fixed `feedback` value for records written by the web check.
pub const FEEDBACK_SENTINEL: &str = "web_check_list_only";

/// A persisted check record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Row id; only the SQLite backend assigns one.
    pub id: Option<i64>,
    pub datetime: NaiveDateTime,
    pub phone: String,
    pub msg: String,
    pub result: String,
    pub feedback: Option<String>,
}

impl LogRecord {
    pub fn formatted_datetime(&self) -> String {
        self.datetime.format(DATETIME_FORMAT).to_string()
    }
}

/// A record about to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub datetime: NaiveDateTime,
    pub phone: String,
    pub msg: String,
    pub result: String,
    pub feedback: String,
}

impl NewLogEntry {
    /// Stamps the entry with the current local time, to the second.
    pub fn new(phone: &str, msg: &str, result: &str) -> Self {
        Self::at(Local::now().naive_local().trunc_subsecs(0), phone, msg, result)
    }

    pub fn at(datetime: NaiveDateTime, phone: &str, msg: &str, result: &str) -> Self {
        let msg = msg.trim();
        Self {
            datetime,
            phone: phone.to_string(),
            msg: if msg.is_empty() {
                DEFAULT_MESSAGE.to_string()
            } else {
                msg.to_string()
            },
            result: result.to_string(),
            feedback: FEEDBACK_SENTINEL.to_string(),
        }
    }

    pub fn formatted_datetime(&self) -> String {
        self.datetime.format(DATETIME_FORMAT).to_string()
    }
}

/// Storage contract shared by every backend.
///
/// Implementations must tolerate concurrent `append` calls.
pub trait CallLogStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    fn append(&self, entry: &NewLogEntry) -> Result<(), LogStoreError>;

    /// Every record, newest first. Fails as a whole rather than returning a
    /// partial list.
    fn list_all(&self) -> Result<Vec<LogRecord>, LogStoreError>;
}

/// Opens the configured store, creating its table or file if needed.
pub fn open(config: &LogStoreConfig) -> Result<Arc<dyn CallLogStore>, LogStoreError> {
    let store: Arc<dyn CallLogStore> = match config {
        LogStoreConfig::Sqlite(path) => Arc::new(SqliteCallLog::new(Database::open(path)?)),
        LogStoreConfig::SqliteMemory => Arc::new(SqliteCallLog::new(Database::open_in_memory()?)),
        LogStoreConfig::Csv(path) => Arc::new(CsvCallLog::open(path)?),
        LogStoreConfig::Disabled => Arc::new(DisabledCallLog),
        LogStoreConfig::Unavailable { reason } => {
            return Err(LogStoreError::Unavailable {
                reason: reason.clone(),
            })
        }
    };
    tracing::info!(backend = store.backend(), "Call log store ready");
    Ok(store)
}

/// Parses a stored timestamp, accepting an optional fractional second.
pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, LogStoreError> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S%.f").map_err(|e| {
        LogStoreError::InvalidTimestamp {
            value: value.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_new_entry_defaults_message_and_feedback() {
        let entry = NewLogEntry::at(ts(9, 0, 0), "0812345678", "   ", "result");
        assert_eq!(entry.msg, DEFAULT_MESSAGE);
        assert_eq!(entry.feedback, FEEDBACK_SENTINEL);

        let entry = NewLogEntry::at(ts(9, 0, 0), "0812345678", " hello ", "result");
        assert_eq!(entry.msg, "hello");
    }

    #[test]
    fn test_new_entry_has_whole_seconds() {
        let entry = NewLogEntry::new("1", "", "r");
        assert_eq!(entry.datetime.and_utc().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_formatted_datetime() {
        let entry = NewLogEntry::at(ts(7, 5, 3), "1", "", "r");
        assert_eq!(entry.formatted_datetime(), "2026-03-01 07:05:03");
    }

    #[test]
    fn test_parse_datetime_accepts_fraction() {
        assert_eq!(parse_datetime("2026-03-01 07:05:03").unwrap(), ts(7, 5, 3));
        assert_eq!(
            parse_datetime("2026-03-01 07:05:03.250000").unwrap().trunc_subsecs(0),
            ts(7, 5, 3)
        );
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(LogStoreError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_open_disabled() {
        let store = open(&LogStoreConfig::Disabled).unwrap();
        assert_eq!(store.backend(), "disabled");
    }

    #[test]
    fn test_open_unavailable_is_an_error() {
        let result = open(&LogStoreConfig::Unavailable {
            reason: "Unsupported log store scheme 'postgres'".to_string(),
        });
        assert!(matches!(result, Err(LogStoreError::Unavailable { .. })));
    }

    #[test]
    fn test_open_sqlite_memory() {
        let store = open(&LogStoreConfig::SqliteMemory).unwrap();
        assert_eq!(store.backend(), "sqlite");
        store
            .append(&NewLogEntry::at(ts(1, 0, 0), "1", "", "r"))
            .unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
