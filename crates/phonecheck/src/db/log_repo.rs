//! Call log repository: insert and list operations for the `log_entries` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw log row from the database.
#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub datetime: String,
    pub phone: String,
    pub msg: Option<String>,
    pub result: String,
    pub feedback: Option<String>,
}

impl LogRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            datetime: row.get("datetime")?,
            phone: row.get("phone")?,
            msg: row.get("msg")?,
            result: row.get("result")?,
            feedback: row.get("feedback")?,
        })
    }
}

/// Inserts one log row inside a transaction and returns its id.
///
/// The transaction rolls back when dropped uncommitted, so a failed insert
/// leaves no partial state behind.
pub fn insert(
    db: &Database,
    datetime: &str,
    phone: &str,
    msg: Option<&str>,
    result: &str,
    feedback: Option<&str>,
) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO log_entries (datetime, phone, msg, result, feedback)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![datetime, phone, msg, result, feedback],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    })
}

/// Returns every row, newest first. Rows sharing a timestamp are ordered by
/// insertion, latest first.
pub fn list_all(db: &Database) -> Result<Vec<LogRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, datetime, phone, msg, result, feedback
             FROM log_entries ORDER BY datetime DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], LogRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
