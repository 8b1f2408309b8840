use super::{CallLogStore, LogRecord, NewLogEntry};
use crate::error::LogStoreError;

/// Store used when no durable storage is available. Appends are dropped
/// and listings are always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCallLog;

impl CallLogStore for DisabledCallLog {
    fn backend(&self) -> &'static str {
        "disabled"
    }

    fn append(&self, _entry: &NewLogEntry) -> Result<(), LogStoreError> {
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<LogRecord>, LogStoreError> {
        Ok(Vec::new())
    }
}
