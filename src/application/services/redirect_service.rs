//! Short code resolution.

use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{MappingStore, StoreVariant};
use crate::error::AppError;

/// Service resolving short codes to their long URLs.
///
/// Read-only: resolving a code has no side effects on the store.
pub struct RedirectService {
    store: Arc<dyn MappingStore>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    pub fn variant(&self) -> StoreVariant {
        self.store.variant()
    }

    /// Looks up the live mapping for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    /// Returns [`AppError::Store`] if the store fails.
    pub async fn resolve(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        match self.store.find_by_short_code(short_code).await? {
            Some(mapping) if !mapping.is_expired() => Ok(mapping),
            _ => {
                debug!(short_code, "Short code not found");
                Err(AppError::not_found(self.store.variant()))
            }
        }
    }
}
