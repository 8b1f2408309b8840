use std::sync::Arc;

use tracing::{debug, warn};

use crate::call_log::{CallLogStore, LogRecord, NewLogEntry};
use crate::classifier::{Classification, Classifier};
use crate::error::LogStoreError;

/// Classifies a number and records the check.
///
/// Log write failures never reach the caller: the classification is
/// returned regardless.
#[derive(Clone)]
pub struct CheckService {
    classifier: Classifier,
    log_store: Arc<dyn CallLogStore>,
}

impl CheckService {
    pub fn new(classifier: Classifier, log_store: Arc<dyn CallLogStore>) -> Self {
        Self {
            classifier,
            log_store,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn log_backend(&self) -> &'static str {
        self.log_store.backend()
    }

    pub fn check(&self, phone: &str, message: &str) -> Classification {
        let phone = phone.trim();
        let classification = self.classifier.classify(phone);

        if !classification.verdict.should_log() {
            return classification;
        }

        debug!(phone, verdict = ?classification.verdict, "Phone number checked");

        let entry = NewLogEntry::new(phone, message, &classification.label);
        if let Err(e) = self.log_store.append(&entry) {
            warn!(
                backend = self.log_store.backend(),
                "Failed to write call log entry: {}", e
            );
        }

        classification
    }

    pub fn recent_logs(&self) -> Result<Vec<LogRecord>, LogStoreError> {
        self.log_store.list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_log::{DisabledCallLog, SqliteCallLog};
    use crate::classifier::Verdict;
    use crate::db::Database;
    use crate::reference::ReferenceData;

    struct FailingStore;

    impl CallLogStore for FailingStore {
        fn backend(&self) -> &'static str {
            "failing"
        }

        fn append(&self, _entry: &NewLogEntry) -> Result<(), LogStoreError> {
            Err(LogStoreError::LockPoisoned)
        }

        fn list_all(&self) -> Result<Vec<LogRecord>, LogStoreError> {
            Err(LogStoreError::LockPoisoned)
        }
    }

    fn classifier() -> Classifier {
        Classifier::new(Arc::new(
            ReferenceData::default()
                .with_official("021234567", "กสทช.")
                .with_blacklisted("0899999999"),
        ))
    }

    fn sqlite_service() -> CheckService {
        let store = SqliteCallLog::new(Database::open_in_memory().unwrap());
        CheckService::new(classifier(), Arc::new(store))
    }

    #[test]
    fn test_check_appends_one_record_with_result() {
        let service = sqlite_service();
        let result = service.check(" 0899999999 ", "hello");

        let logs = service.recent_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].phone, "0899999999");
        assert_eq!(logs[0].msg, "hello");
        assert_eq!(logs[0].result, result.label);
    }

    #[test]
    fn test_blank_phone_is_not_logged() {
        let service = sqlite_service();
        assert_eq!(service.check("", "x").verdict, Verdict::MissingPhone);
        assert_eq!(service.check("   ", "x").verdict, Verdict::MissingPhone);
        assert!(service.recent_logs().unwrap().is_empty());
    }

    #[test]
    fn test_each_check_appends() {
        let service = sqlite_service();
        service.check("021234567", "");
        service.check("021234567", "");
        service.check("0000000000", "");

        assert_eq!(service.recent_logs().unwrap().len(), 3);
    }

    #[test]
    fn test_write_failure_still_returns_classification() {
        let service = CheckService::new(classifier(), Arc::new(FailingStore));
        let result = service.check("0899999999", "");
        assert_eq!(result.verdict, Verdict::Scam);
        assert!(service.recent_logs().is_err());
    }

    #[test]
    fn test_disabled_store() {
        let service = CheckService::new(classifier(), Arc::new(DisabledCallLog));
        assert_eq!(service.check("0000000000", "").verdict, Verdict::Unknown);
        assert!(service.recent_logs().unwrap().is_empty());
        assert_eq!(service.log_backend(), "disabled");
    }
}
