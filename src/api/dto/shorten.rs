//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. Must be an absolute HTTP/HTTPS URL.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// A freshly created mapping.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub long_url: String,
    pub code: String,
    pub short_url: String,
}
