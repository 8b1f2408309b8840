use super::{parse_datetime, CallLogStore, LogRecord, NewLogEntry};
use crate::db::{log_repo, Database};
use crate::error::LogStoreError;

/// Call log stored in the `log_entries` table.
#[derive(Clone)]
pub struct SqliteCallLog {
    db: Database,
}

impl SqliteCallLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl CallLogStore for SqliteCallLog {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn append(&self, entry: &NewLogEntry) -> Result<(), LogStoreError> {
        log_repo::insert(
            &self.db,
            &entry.formatted_datetime(),
            &entry.phone,
            Some(entry.msg.as_str()),
            &entry.result,
            Some(entry.feedback.as_str()),
        )?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<LogRecord>, LogStoreError> {
        log_repo::list_all(&self.db)?
            .into_iter()
            .map(|row| -> Result<LogRecord, LogStoreError> {
                Ok(LogRecord {
                    id: Some(row.id),
                    datetime: parse_datetime(&row.datetime)?,
                    phone: row.phone,
                    msg: row.msg.unwrap_or_default(),
                    result: row.result,
                    feedback: row.feedback,
                })
            })
            .collect()
    }
}
