//! Startup wiring: reference data, call log store, router, listener.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::call_log::{self, CallLogStore, DisabledCallLog};
use crate::classifier::Classifier;
use crate::config::ServerConfig;
use crate::http::{self, AppState};
use crate::reference;
use crate::service::CheckService;

/// Loads reference data and opens the call log.
///
/// Never fails. Missing reference files leave empty tables, and a log store
/// that cannot be opened is replaced by the disabled store (list-only mode).
pub fn build_state(config: &ServerConfig) -> AppState {
    let outcome = reference::load(&config.reference_sources());
    info!(
        official = outcome.data.official_count(),
        blacklist = outcome.data.blacklist_count(),
        complete = outcome.is_complete(),
        "Reference data loaded"
    );

    let log_store: Arc<dyn CallLogStore> = match call_log::open(&config.log_store) {
        Ok(store) => store,
        Err(e) => {
            warn!(
                backend = config.log_store.backend_name(),
                "Could not open call log, running in list-only mode: {}", e
            );
            Arc::new(DisabledCallLog)
        }
    };

    let classifier = Classifier::new(Arc::new(outcome.data));
    AppState::new(CheckService::new(classifier, log_store))
}

/// Serves HTTP on `config.bind` until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let state = build_state(&config);
    let app = http::router(state);

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
