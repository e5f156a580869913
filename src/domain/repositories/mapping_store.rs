//! Storage contract for short code mappings.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// Persistence semantics of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreVariant {
    /// Mappings live until explicitly removed; creation is idempotent per long URL.
    Durable,
    /// Mappings carry a TTL and are reclaimed by the store; every creation mints a new code.
    Expiring,
}

impl StoreVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreVariant::Durable => "durable",
            StoreVariant::Expiring => "expiring",
        }
    }
}

/// Store interface for URL mappings.
///
/// Every operation is a potential suspension point (network round-trip to the
/// backing store). Single-key reads and writes are atomic.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL, durable
/// - [`crate::infrastructure::persistence::RedisMappingStore`] - Redis, expiring
/// - [`crate::infrastructure::persistence::MemoryMappingStore`] - In-process, either variant
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Reports whether this store is durable or expiring.
    fn variant(&self) -> StoreVariant;

    /// Finds the live mapping for a long URL.
    ///
    /// Expiring stores are keyed by short code only and always return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the live mapping for a short code.
    ///
    /// Never returns a mapping whose expiry has passed, even if the backend has
    /// not reclaimed it yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn find_by_short_code(&self, short_code: &str)
    -> Result<Option<UrlMapping>, StoreError>;

    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if a live mapping already uses the
    /// short code. The caller may regenerate and try again.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError>;

    /// Inserts a mapping unless one already exists for the same long URL, in
    /// which case the existing mapping is returned untouched.
    ///
    /// Durable stores perform this as one atomic step. Expiring stores have no
    /// long URL index and behave like [`MappingStore::insert`].
    ///
    /// # Errors
    ///
    /// Same as [`MappingStore::insert`].
    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError>;

    /// Checks connectivity to the backend.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases backend resources. Called once on shutdown.
    async fn close(&self);
}
