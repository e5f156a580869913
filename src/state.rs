//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShorteningService};
use crate::config::Config;
use crate::domain::repositories::MappingStore;
use crate::utils::code_generator::CodeGenerator;

/// Application state holding the services built around one store handle.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Builds both services on top of `store`.
    pub fn new(
        store: Arc<dyn MappingStore>,
        base_url: impl Into<String>,
        code_length: usize,
        default_ttl_seconds: u64,
    ) -> Self {
        Self {
            shortening_service: Arc::new(ShorteningService::new(
                store.clone(),
                CodeGenerator::new(code_length),
                default_ttl_seconds,
                base_url,
            )),
            redirect_service: Arc::new(RedirectService::new(store)),
        }
    }

    /// Builds the state from loaded configuration.
    pub fn from_config(store: Arc<dyn MappingStore>, config: &Config) -> Self {
        Self::new(
            store,
            config.base_url.clone(),
            config.code_length,
            config.default_expiration_seconds,
        )
    }
}
