//! Core domain entities.
//!
//! - [`UrlMapping`] - a stored short code to long URL binding
//! - [`NewMapping`] - input for creating one

pub mod mapping;

pub use mapping::{NewMapping, UrlMapping};
