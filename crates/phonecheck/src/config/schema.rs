use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::reference::ReferenceSources;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_STORE: &str = "sqlite:///web_log.db";

/// Where check records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStoreConfig {
    Sqlite(PathBuf),
    /// Private in-memory SQLite database; records vanish on restart.
    SqliteMemory,
    Csv(PathBuf),
    /// List-only mode: nothing is recorded.
    Disabled,
    /// The setting named a backend this build cannot use. Startup continues
    /// in list-only mode.
    Unavailable { reason: String },
}

impl LogStoreConfig {
    /// Resolves relative file paths against `base`.
    pub fn resolve(self, base: &Path) -> Self {
        match self {
            LogStoreConfig::Sqlite(path) if path.is_relative() => {
                LogStoreConfig::Sqlite(base.join(path))
            }
            LogStoreConfig::Csv(path) if path.is_relative() => LogStoreConfig::Csv(base.join(path)),
            other => other,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            LogStoreConfig::Sqlite(_) | LogStoreConfig::SqliteMemory => "sqlite",
            LogStoreConfig::Csv(_) => "csv",
            LogStoreConfig::Disabled => "disabled",
            LogStoreConfig::Unavailable { .. } => "unavailable",
        }
    }
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    pub official_csv: PathBuf,
    pub scam_csv: PathBuf,
    pub log_store: LogStoreConfig,
}

impl ServerConfig {
    pub fn reference_sources(&self) -> ReferenceSources {
        ReferenceSources {
            official: self.official_csv.clone(),
            scam: self.scam_csv.clone(),
        }
    }
}
