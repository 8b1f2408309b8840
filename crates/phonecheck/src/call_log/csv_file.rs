use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;

use super::{parse_datetime, CallLogStore, LogRecord, NewLogEntry};
use crate::error::LogStoreError;

const HEADER: [&str; 5] = ["datetime", "phone", "msg", "result", "feedback"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    datetime: String,
    phone: String,
    #[serde(default)]
    msg: String,
    result: String,
    #[serde(default)]
    feedback: Option<String>,
}

/// Call log kept in a CSV file with header `datetime,phone,msg,result,feedback`.
///
/// Each append opens the file, writes one record and closes it again.
/// Appends from this process are serialized by `write_lock`.
pub struct CsvCallLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvCallLog {
    /// Opens the log, creating the file and its header when absent.
    /// An existing file is left untouched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LogStoreError> {
        let log = Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        };
        log.ensure_file()?;
        tracing::info!(path = %log.path.display(), "Call log file ready");
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LogStoreError {
        LogStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> LogStoreError {
        LogStoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_file(&self) -> Result<(), LogStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LogStoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let is_empty = file.metadata().map_err(|e| self.io_error(e))?.len() == 0;
        if is_empty {
            let mut writer = csv::Writer::from_writer(file);
            writer
                .write_record(HEADER)
                .map_err(|e| self.csv_error(e))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }
}

impl CallLogStore for CsvCallLog {
    fn backend(&self) -> &'static str {
        "csv"
    }

    fn append(&self, entry: &NewLogEntry) -> Result<(), LogStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LogStoreError::LockPoisoned)?;

        // Recreates the header if the file was removed underneath us.
        self.ensure_file()?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record([
                entry.formatted_datetime().as_str(),
                entry.phone.as_str(),
                entry.msg.as_str(),
                entry.result.as_str(),
                entry.feedback.as_str(),
            ])
            .map_err(|e| self.csv_error(e))?;
        let mut file = writer
            .into_inner()
            .map_err(|e| self.io_error(e.into_error()))?;
        file.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<LogRecord>, LogStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| self.csv_error(e))?;
            records.push(LogRecord {
                id: None,
                datetime: parse_datetime(&row.datetime)?,
                phone: row.phone,
                msg: row.msg,
                result: row.result,
                feedback: row.feedback.filter(|f| !f.is_empty()),
            });
        }

        // Later rows win ties: reverse file order, then a stable sort.
        records.reverse();
        records.sort_by(|a, b| b.datetime.cmp(&a.datetime));
        Ok(records)
    }
}
