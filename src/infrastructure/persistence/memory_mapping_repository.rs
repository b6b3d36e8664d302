//! Process-local implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{DEFAULT_TABLE_NAME, unique_constraint};
use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, DuplicateKind};

#[derive(Debug, Default)]
struct Indexes {
    by_code: HashMap<String, UrlMapping>,
    /// long URL -> short code
    by_url: HashMap<String, String>,
}

/// In-memory mapping store for development and tests.
///
/// Both indexes sit behind one lock, so the uniqueness checks and the write
/// happen atomically. Duplicates are reported with the same constraint names
/// the PostgreSQL schema uses.
#[derive(Debug)]
pub struct InMemoryMappingRepository {
    table_name: String,
    indexes: RwLock<Indexes>,
}

impl InMemoryMappingRepository {
    /// Creates an empty repository that reports constraints of the default table.
    pub fn new() -> Self {
        Self::with_table_name(DEFAULT_TABLE_NAME)
    }

    /// Creates an empty repository that reports constraints of `table_name`.
    pub fn with_table_name(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            indexes: RwLock::new(Indexes::default()),
        }
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.indexes.read().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn duplicate(&self, kind: DuplicateKind, column: &str) -> AppError {
        let constraint = unique_constraint(&self.table_name, column);

        AppError::duplicate(
            kind,
            format!("duplicate key value violates unique constraint \"{constraint}\""),
            json!({ "constraint": constraint }),
        )
    }
}

impl Default for InMemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let mut indexes = self.indexes.write().await;

        if indexes.by_code.contains_key(&new_mapping.short_code) {
            return Err(self.duplicate(DuplicateKind::ShortCode, "short_code"));
        }
        if indexes.by_url.contains_key(&new_mapping.long_url) {
            return Err(self.duplicate(DuplicateKind::LongUrl, "long_url"));
        }

        let mapping = UrlMapping::new(new_mapping.short_code, new_mapping.long_url, Utc::now());

        indexes
            .by_url
            .insert(mapping.long_url.clone(), mapping.short_code.clone());
        indexes
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.indexes.read().await.by_code.get(code).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
