pub mod bootstrap;
pub mod call_log;
pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod reference;
pub mod service;
pub mod telemetry;

pub use bootstrap::{build_state, serve};
pub use call_log::{CallLogStore, LogRecord, NewLogEntry};
pub use classifier::{Classification, Classifier, Verdict};
pub use config::{build_config, LogStoreConfig, RawSettings, ServerConfig};
pub use error::{ConfigError, LogStoreError, PhonecheckError, ReferenceDataError, Result};
pub use http::{router, AppState};
pub use reference::{LoadOutcome, ReferenceData, ReferenceSources};
pub use service::CheckService;
