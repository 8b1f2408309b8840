pub mod loader;
pub mod schema;

pub use loader::{build_config, parse_bind, parse_log_store, RawSettings};
pub use schema::{LogStoreConfig, ServerConfig, DEFAULT_BIND, DEFAULT_LOG_STORE};
