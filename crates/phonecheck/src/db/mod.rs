//! SQLite storage behind the call log.
//!
//! One connection per file, shared by every request handler.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub mod error;
pub mod log_repo;
pub mod migrations;

pub use error::DatabaseError;

/// Shared handle to the call log database. Clones point at the same
/// connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens or creates the log database at `path`, creating missing parent
    /// directories, then applies pending migrations. Existing rows are kept.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        migrations::run_all(&conn)?;

        log::info!("Call log database ready at {}", path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory log database; rows are lost when the last clone drops.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;

        migrations::run_all(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` while holding the connection lock.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&mut Connection) -> Result<T, DatabaseError>,
    {
        let mut conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&mut conn)
    }
}
