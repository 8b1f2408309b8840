use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::config::schema::{LogStoreConfig, ServerConfig};
use crate::error::ConfigError;
use crate::reference::loader::{OFFICIAL_FILE_NAME, SCAM_FILE_NAME};

/// Raw, unvalidated settings as they arrive from CLI flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub bind: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub official_csv: Option<PathBuf>,
    pub scam_csv: Option<PathBuf>,
    pub log_store: Option<String>,
}

pub fn build_config(raw: RawSettings) -> Result<ServerConfig, ConfigError> {
    let bind = parse_bind(raw.bind.as_deref().unwrap_or(super::schema::DEFAULT_BIND))?;
    let data_dir = raw.data_dir.unwrap_or_else(|| PathBuf::from("."));

    let official_csv = resolve_path(&data_dir, raw.official_csv, OFFICIAL_FILE_NAME);
    let scam_csv = resolve_path(&data_dir, raw.scam_csv, SCAM_FILE_NAME);

    // Unusable log store settings become list-only mode at startup.
    let log_store = match parse_log_store(
        raw.log_store
            .as_deref()
            .unwrap_or(super::schema::DEFAULT_LOG_STORE),
    ) {
        Ok(store) => store.resolve(&data_dir),
        Err(e) => LogStoreConfig::Unavailable {
            reason: e.to_string(),
        },
    };

    Ok(ServerConfig {
        bind,
        data_dir,
        official_csv,
        scam_csv,
        log_store,
    })
}

fn resolve_path(data_dir: &Path, explicit: Option<PathBuf>, default_name: &str) -> PathBuf {
    match explicit {
        Some(path) if path.is_relative() => data_dir.join(path),
        Some(path) => path,
        None => data_dir.join(default_name),
    }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBind {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parses the single log storage setting.
///
/// Accepted forms:
/// - `disabled`, `none`, `off`
/// - `sqlite::memory:` or `sqlite://` (in-memory)
/// - `sqlite:///relative.db`, `sqlite:////absolute/path.db`, `sqlite://relative.db`
/// - `csv://path/to/web_log.csv`
pub fn parse_log_store(value: &str) -> Result<LogStoreConfig, ConfigError> {
    let trimmed = value.trim();
    let invalid = |reason: &str| ConfigError::InvalidLogStore {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "disabled" | "none" | "off"
    ) {
        return Ok(LogStoreConfig::Disabled);
    }

    let Some((scheme, rest)) = trimmed.split_once(':') else {
        return Err(invalid("expected '<scheme>://<path>' or 'disabled'"));
    };

    match scheme.to_ascii_lowercase().as_str() {
        "sqlite" => {
            if rest == ":memory:" {
                return Ok(LogStoreConfig::SqliteMemory);
            }
            let path = url_path(rest).ok_or_else(|| invalid("missing '//' after scheme"))?;
            if path.is_empty() || path == ":memory:" {
                Ok(LogStoreConfig::SqliteMemory)
            } else {
                Ok(LogStoreConfig::Sqlite(PathBuf::from(path)))
            }
        }
        "csv" => {
            let path = url_path(rest).ok_or_else(|| invalid("missing '//' after scheme"))?;
            if path.is_empty() {
                Err(invalid("empty file path"))
            } else {
                Ok(LogStoreConfig::Csv(PathBuf::from(path)))
            }
        }
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// `//x` -> `x`, `///x` -> `x`, `////x` -> `/x`.
fn url_path(rest: &str) -> Option<&str> {
    let path = rest.strip_prefix("//")?;
    Some(path.strip_prefix('/').unwrap_or(path))
}
