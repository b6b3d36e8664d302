//! Repository trait for the URL registry.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for short code to long URL mappings.
///
/// Implementations must reject a second mapping with the same short code and
/// a second mapping with the same long URL, reporting both as
/// [`AppError::Duplicate`] with the violated constraint. A failed insert
/// leaves no partial state behind.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists one mapping in a single atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Duplicate`] if the short code or the long URL is
    /// already stored.
    ///
    /// Returns [`AppError::Persistence`] on any other storage fault.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its exact short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage faults.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
