//! Test harness for isolated integration tests.
//!
//! The `TestHarness` struct owns a temporary data directory, writes fixture
//! reference CSVs into it and builds server configs and app state on top.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use phonecheck::config::{LogStoreConfig, ServerConfig};
use phonecheck::reference::loader::{OFFICIAL_FILE_NAME, SCAM_FILE_NAME};
use phonecheck::{build_state, AppState};

/// Isolated data directory for one test.
pub struct TestHarness {
    temp_dir: TempDir,
    /// Directory holding reference CSVs and file-backed logs.
    pub data_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        Self { temp_dir, data_dir }
    }

    /// Harness preloaded with the canonical three-number fixture.
    pub fn with_fixture_lists() -> Self {
        let harness = Self::new();
        harness.write_official(&[("021234567", "official", "กสทช.")]);
        harness.write_scam(&[("0899999999", "scam", "reported")]);
        harness
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `call_official.csv` with the canonical header.
    pub fn write_official(&self, rows: &[(&str, &str, &str)]) -> PathBuf {
        let mut content = String::from("phone,result,feedback\n");
        for (phone, result, feedback) in rows {
            content.push_str(&format!("{}, {}, {}\n", phone, result, feedback));
        }
        self.write_data_file(OFFICIAL_FILE_NAME, &content)
    }

    /// Writes `call_scam.csv` with a `phone,result,feedback` header.
    pub fn write_scam(&self, rows: &[(&str, &str, &str)]) -> PathBuf {
        let mut content = String::from("phone,result,feedback\n");
        for (phone, result, feedback) in rows {
            content.push_str(&format!("{},{},{}\n", phone, result, feedback));
        }
        self.write_data_file(SCAM_FILE_NAME, &content)
    }

    pub fn write_data_file(&self, filename: &str, content: &str) -> PathBuf {
        let path = self.data_dir.join(filename);
        std::fs::write(&path, content).expect("Failed to write data file");
        path
    }

    pub fn config(&self, log_store: LogStoreConfig) -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:0".parse().expect("valid bind address"),
            data_dir: self.data_dir.clone(),
            official_csv: self.data_dir.join(OFFICIAL_FILE_NAME),
            scam_csv: self.data_dir.join(SCAM_FILE_NAME),
            log_store,
        }
    }

    pub fn sqlite_config(&self) -> ServerConfig {
        self.config(LogStoreConfig::Sqlite(self.data_dir.join("web_log.db")))
    }

    pub fn csv_config(&self) -> ServerConfig {
        self.config(LogStoreConfig::Csv(self.data_dir.join("web_log.csv")))
    }

    pub fn state(&self, config: &ServerConfig) -> AppState {
        build_state(config)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
