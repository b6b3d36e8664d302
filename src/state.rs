//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::UrlService;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Public prefix prepended to codes in `short_url`.
    pub base_url: String,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, base_url: impl Into<String>) -> Self {
        Self {
            url_service,
            base_url: base_url.into(),
        }
    }
}
