//! Shortening and resolution of URLs.

use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, DuplicateKind};
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Service for creating and resolving short URLs.
///
/// Combines the code generator and the registry. Neither operation retries:
/// a code collision is returned to the caller as [`AppError::Duplicate`]
/// with [`DuplicateKind::ShortCode`], and deciding whether to try again is
/// up to the caller.
pub struct UrlService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(repository: Arc<dyn MappingRepository>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Shortens `long_url` and stores the mapping.
    ///
    /// The URL is stored exactly as given.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    ///   Nothing is generated or written.
    /// - [`AppError::Entropy`] if the secure random source fails. Nothing is written.
    /// - [`AppError::Duplicate`] if the URL was already shortened or the
    ///   generated code is taken.
    /// - [`AppError::Persistence`] on any other storage fault.
    pub async fn shorten_url(&self, long_url: &str) -> Result<UrlMapping, AppError> {
        validate_url(long_url).map_err(|e| {
            AppError::bad_request(
                format!("'{long_url}' is not a valid URL."),
                json!({ "reason": e.to_string() }),
            )
        })?;

        let code = self.generator.generate()?;

        let result = self
            .repository
            .insert(NewMapping::new(code.clone(), long_url))
            .await;

        match result {
            Ok(mapping) => {
                tracing::info!(code = %mapping.short_code, long_url, "URL shortened");
                Ok(mapping)
            }
            Err(AppError::Duplicate { kind, details, .. }) => {
                tracing::warn!(code = %code, long_url, ?kind, "Duplicate mapping rejected");

                let message = match kind {
                    DuplicateKind::ShortCode => {
                        format!("Short code '{code}' is already in use, please try again.")
                    }
                    DuplicateKind::LongUrl | DuplicateKind::Unknown => {
                        format!("{long_url} has already been shortened.")
                    }
                };

                Err(AppError::duplicate(kind, message, details))
            }
            Err(AppError::Persistence { details, .. }) => {
                tracing::error!(
                    code = %code,
                    long_url,
                    error = %details,
                    "Failed to persist mapping"
                );

                Err(AppError::persistence(
                    format!("There was an issue shortening '{long_url}'."),
                    details,
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the long URL stored for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping matches the code.
    /// Returns [`AppError::Persistence`] on storage faults.
    pub async fn resolve_url(&self, code: &str) -> Result<String, AppError> {
        let mapping = self.repository.find_by_code(code).await?;

        match mapping {
            Some(mapping) => Ok(mapping.long_url),
            None => {
                tracing::debug!(code, "Short code not found");
                Err(AppError::not_found(
                    "Record not found",
                    json!({ "code": code }),
                ))
            }
        }
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
