//! CSV readers for the two reference sources.
//!
//! Both files are UTF-8 CSV with a header row. Columns are located by name:
//!
//! - official numbers: `phone,result,feedback`, where `feedback` holds the
//!   agency label;
//! - scam numbers: at least `phone` and `result`; a row is blacklisted when
//!   `result` contains "scam" (any case) and `phone` is non-empty.
//!
//! Headerless or positional layouts are not supported.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{info, info_span, warn};

use super::ReferenceData;
use crate::error::ReferenceDataError;

pub const OFFICIAL_FILE_NAME: &str = "call_official.csv";
pub const SCAM_FILE_NAME: &str = "call_scam.csv";

/// Locations of the reference CSV files.
#[derive(Debug, Clone)]
pub struct ReferenceSources {
    pub official: PathBuf,
    pub scam: PathBuf,
}

impl ReferenceSources {
    /// Default file names inside `data_dir`.
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        Self {
            official: dir.join(OFFICIAL_FILE_NAME),
            scam: dir.join(SCAM_FILE_NAME),
        }
    }
}

/// Result of a full reference load. `data` is always usable; a failed
/// source simply contributes an empty table.
#[derive(Debug)]
pub struct LoadOutcome {
    pub data: ReferenceData,
    pub official: Result<usize, ReferenceDataError>,
    pub blacklist: Result<usize, ReferenceDataError>,
}

impl LoadOutcome {
    pub fn is_complete(&self) -> bool {
        self.official.is_ok() && self.blacklist.is_ok()
    }
}

/// Loads both reference sources. Never fails: problems are logged and
/// reported per source in the returned outcome.
pub fn load(sources: &ReferenceSources) -> LoadOutcome {
    let _span = info_span!("reference.load").entered();

    let (official_map, official) = match load_official(&sources.official) {
        Ok(map) => {
            info!(
                count = map.len(),
                path = %sources.official.display(),
                "Loaded official numbers"
            );
            let count = map.len();
            (map, Ok(count))
        }
        Err(e) => {
            warn!("Skipping official list: {}", e);
            (HashMap::new(), Err(e))
        }
    };

    let (blacklist_set, blacklist) = match load_blacklist(&sources.scam) {
        Ok(set) => {
            info!(
                count = set.len(),
                path = %sources.scam.display(),
                "Loaded blacklist numbers"
            );
            let count = set.len();
            (set, Ok(count))
        }
        Err(e) => {
            warn!("Starting with empty blacklist: {}", e);
            (HashSet::new(), Err(e))
        }
    };

    LoadOutcome {
        data: ReferenceData::new(official_map, blacklist_set),
        official,
        blacklist,
    }
}

/// Reads the official-numbers CSV into `phone -> agency`.
pub fn load_official(path: &Path) -> Result<HashMap<String, String>, ReferenceDataError> {
    let mut reader = open(path)?;
    let headers = headers(&mut reader, path)?;
    let phone_idx = column(&headers, "phone", path)?;
    let agency_idx = column(&headers, "feedback", path)?;

    let mut official = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, e))?;
        let phone = field(&record, phone_idx);
        if phone.is_empty() {
            continue;
        }
        official.insert(phone.to_string(), field(&record, agency_idx).to_string());
    }

    Ok(official)
}

/// Reads the scam CSV and keeps the phones whose `result` mentions "scam".
pub fn load_blacklist(path: &Path) -> Result<HashSet<String>, ReferenceDataError> {
    let mut reader = open(path)?;
    let headers = headers(&mut reader, path)?;
    let phone_idx = column(&headers, "phone", path)?;
    let result_idx = column(&headers, "result", path)?;

    let mut blacklist = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, e))?;
        let phone = field(&record, phone_idx);
        if phone.is_empty() {
            continue;
        }
        if field(&record, result_idx).to_lowercase().contains("scam") {
            blacklist.insert(phone.to_string());
        }
    }

    Ok(blacklist)
}

fn open(path: &Path) -> Result<Reader<std::fs::File>, ReferenceDataError> {
    if !path.is_file() {
        return Err(ReferenceDataError::NotFound(path.to_path_buf()));
    }
    ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReferenceDataError::Read {
            path: path.to_path_buf(),
            source: e,
        })
}

fn headers(
    reader: &mut Reader<std::fs::File>,
    path: &Path,
) -> Result<StringRecord, ReferenceDataError> {
    reader
        .headers()
        .cloned()
        .map_err(|e| ReferenceDataError::Read {
            path: path.to_path_buf(),
            source: e,
        })
}

fn column(
    headers: &StringRecord,
    name: &'static str,
    path: &Path,
) -> Result<usize, ReferenceDataError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ReferenceDataError::MissingColumn {
            path: path.to_path_buf(),
            column: name,
        })
}

/// Trimmed field value; short rows read as empty.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn parse_error(path: &Path, e: csv::Error) -> ReferenceDataError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    ReferenceDataError::Parse {
        path: path.to_path_buf(),
        line,
        source: e,
    }
}
