use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::AppState;
use crate::call_log::LogRecord;
use crate::error::LogStoreError;
use crate::classifier::Classification;

const INDEX_HTML: &str = include_str!("templates/index.html");
const LOG_HTML: &str = include_str!("templates/log.html");

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Body of `POST /api/check`. Missing or null fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntryResponse {
    pub datetime: String,
    pub phone: String,
    pub msg: String,
    pub result: String,
}

impl From<LogRecord> for LogEntryResponse {
    fn from(record: LogRecord) -> Self {
        Self {
            datetime: record.formatted_datetime(),
            phone: record.phone,
            msg: record.msg,
            result: record.result,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub official_numbers: usize,
    pub blacklist_numbers: usize,
    pub log_backend: String,
}

pub(super) async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(super) async fn log_page() -> Html<&'static str> {
    Html(LOG_HTML)
}

pub(super) async fn check(
    State(state): State<AppState>,
    req: Result<Json<CheckRequest>, JsonRejection>,
) -> Json<Classification> {
    let request = match req {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable check request, treating as empty: {}", rejection);
            CheckRequest::default()
        }
    };
    let phone = request.phone.unwrap_or_default();
    let message = request.message.unwrap_or_default();

    // Log writes block on SQLite or file I/O.
    let service = state.service.clone();
    let phone_for_task = phone.clone();
    match tokio::task::spawn_blocking(move || service.check(&phone_for_task, &message)).await {
        Ok(classification) => Json(classification),
        Err(e) => {
            warn!("Check task failed, answering without logging: {}", e);
            Json(state.service.classifier().classify(&phone))
        }
    }
}

pub(super) async fn all_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogEntryResponse>>, ApiError> {
    let service = state.service.clone();
    let records = joined(tokio::task::spawn_blocking(move || service.recent_logs()).await)
        .map_err(|e| {
            error!("Error reading call log: {}", e);
            read_failure()
        })?;

    Ok(Json(
        records.into_iter().map(LogEntryResponse::from).collect(),
    ))
}

pub(super) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let reference = state.service.classifier().reference();
    Json(HealthResponse {
        status: "ok".to_string(),
        official_numbers: reference.official_count(),
        blacklist_numbers: reference.blacklist_count(),
        log_backend: state.service.log_backend().to_string(),
    })
}

/// Folds a failed blocking task into the store's own error type.
fn joined<T>(
    result: Result<Result<T, LogStoreError>, tokio::task::JoinError>,
) -> Result<T, LogStoreError> {
    result.map_err(|e| LogStoreError::Task(e.to_string()))?
}

fn read_failure() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to read log data".to_string(),
        }),
    )
}
