//! Mapping entity: one short code bound to one long URL.

use chrono::{DateTime, Utc};

/// A persisted short code to long URL binding.
///
/// Mappings are create-only: they are never updated, deleted or expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            long_url,
            created_at,
        }
    }
}

/// Input data for persisting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_code: String,
    pub long_url: String,
}

impl NewMapping {
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
        }
    }
}
