//! Helpers shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Long URL precondition checks
//! - [`db_error`] - Classification of failed inserts

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
