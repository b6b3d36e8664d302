#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use url_registry::application::services::UrlService;
use url_registry::domain::entities::{NewMapping, UrlMapping};
use url_registry::domain::repositories::MappingRepository;
use url_registry::error::AppError;
use url_registry::infrastructure::persistence::InMemoryMappingRepository;
use url_registry::state::AppState;
use url_registry::utils::code_generator::{CodeGenerator, Sha256CodeGenerator};

pub const BASE_URL: &str = "http://sho.rt";

/// Always returns the same code; used to force collisions.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

/// Store whose every call fails as if the database were down.
pub struct UnavailableRepository;

#[async_trait]
impl MappingRepository for UnavailableRepository {
    async fn insert(&self, _new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<UrlMapping>, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::persistence(
        "Database error",
        json!({ "reason": "pool timed out while waiting for an open connection" }),
    )
}

pub fn create_state(
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    AppState::new(Arc::new(UrlService::new(repository, generator)), BASE_URL)
}

/// In-memory state with the production code generator.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = create_state(repository.clone(), Arc::new(Sha256CodeGenerator::new()));

    (state, repository)
}

/// In-memory state whose generator always yields `code`.
pub fn create_fixed_code_state(code: &'static str) -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = create_state(repository.clone(), Arc::new(FixedCodeGenerator(code)));

    (state, repository)
}

pub fn create_unavailable_state() -> AppState {
    create_state(
        Arc::new(UnavailableRepository),
        Arc::new(Sha256CodeGenerator::new()),
    )
}

pub async fn create_test_mapping(repository: &InMemoryMappingRepository, code: &str, url: &str) {
    repository
        .insert(NewMapping::new(code, url))
        .await
        .unwrap();
}
