//! Reference lookup data: official agency numbers and the scam blacklist.

pub mod loader;

use std::collections::{HashMap, HashSet};

pub use loader::{load, load_blacklist, load_official, LoadOutcome, ReferenceSources};

/// Read-only lookup tables built once at startup and shared behind an `Arc`.
///
/// Keys are trimmed phone strings compared by exact equality.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    official: HashMap<String, String>,
    blacklist: HashSet<String>,
}

impl ReferenceData {
    pub fn new(official: HashMap<String, String>, blacklist: HashSet<String>) -> Self {
        Self {
            official,
            blacklist,
        }
    }

    /// Adds an official number. Later entries overwrite earlier ones.
    pub fn with_official(mut self, phone: &str, agency: &str) -> Self {
        self.official
            .insert(phone.trim().to_string(), agency.trim().to_string());
        self
    }

    pub fn with_blacklisted(mut self, phone: &str) -> Self {
        self.blacklist.insert(phone.trim().to_string());
        self
    }

    pub fn agency_for(&self, phone: &str) -> Option<&str> {
        self.official.get(phone).map(String::as_str)
    }

    pub fn is_blacklisted(&self, phone: &str) -> bool {
        self.blacklist.contains(phone)
    }

    pub fn official_count(&self) -> usize {
        self.official.len()
    }

    pub fn blacklist_count(&self) -> usize {
        self.blacklist.len()
    }
}
