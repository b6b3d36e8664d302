//! Infrastructure layer: concrete implementations of the domain's
//! repository traits.
//!
//! - [`persistence`] - PostgreSQL and in-memory mapping stores

pub mod persistence;
