//! Tracing subscriber setup.
//!
//! `log` records (from rusqlite, the `db` module and dependencies) are bridged
//! into `tracing` through `tracing-log`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Returns `false` when a subscriber was already installed, which makes
/// repeated calls (tests, embedding) harmless.
pub fn init(default_filter: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        tracing::subscriber::set_global_default(registry.with(fmt::layer().json())).is_ok()
    } else {
        tracing::subscriber::set_global_default(registry.with(fmt::layer())).is_ok()
    };

    if installed {
        let _ = tracing_log::LogTracer::init();
    }
    installed
}
