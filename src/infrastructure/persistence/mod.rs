//! Mapping repository implementations.
//!
//! - [`PgMappingRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryMappingRepository`] - process-local storage for development and tests
//!
//! Both report uniqueness violations with the constraint names produced by
//! [`unique_constraint`].

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use memory_mapping_repository::InMemoryMappingRepository;
pub use pg_mapping_repository::{PgMappingRepository, quote_identifier};

/// Table used when `DB_TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "url_mappings";

/// Name of the unique constraint on `column` of `table`, e.g. `url_mappings_short_code_key`.
pub fn unique_constraint(table: &str, column: &str) -> String {
    format!("{table}_{column}_key")
}
